//! Virtual light — responds to `turn_on` and `turn_off`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lightgroup_domain::attributes::Attributes;
use lightgroup_domain::entity::EntityState;
use lightgroup_domain::id::EntityId;
use lightgroup_domain::service::Service;

#[derive(Debug)]
struct Inner {
    state: EntityState,
    attributes: Attributes,
    reachable: bool,
}

/// A simulated light.
#[derive(Debug)]
pub struct VirtualLight {
    entity_id: EntityId,
    inner: Mutex<Inner>,
}

impl VirtualLight {
    #[must_use]
    pub fn new(entity_id: EntityId, state: EntityState) -> Self {
        Self {
            entity_id,
            inner: Mutex::new(Inner {
                state,
                attributes: Attributes::new(),
                reachable: true,
            }),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Current state; an unreachable light reads as unavailable.
    #[must_use]
    pub fn state(&self) -> EntityState {
        let inner = self.lock();
        if inner.reachable {
            inner.state
        } else {
            EntityState::Unavailable
        }
    }

    /// Attributes applied by the last `turn_on` calls.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.lock().attributes.clone()
    }

    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.lock().reachable
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Apply a service; `turn_on` also merges the forwarded attributes.
    pub fn apply(&self, service: Service, data: &Attributes) {
        let mut inner = self.lock();
        match service {
            Service::TurnOn => {
                inner.state = EntityState::On;
                inner.attributes.merge(data);
            }
            Service::TurnOff => inner.state = EntityState::Off,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
