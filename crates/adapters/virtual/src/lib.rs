//! # lightgroup-adapter-virtual
//!
//! Simulated member lights for demonstration and testing.
//!
//! [`VirtualLights`] implements both ports a group needs:
//!
//! | Port | Behaviour |
//! |------|-----------|
//! | `StateReader` | Current state of a light; unknown ids have no state, unreachable lights read as `unavailable` |
//! | `ServiceDispatcher` | Applies `turn_on` / `turn_off` to every target and records the call |
//!
//! A call naming an unknown or unreachable light fails before any light is
//! changed.
//!
//! ## Dependency rule
//!
//! Depends on `lightgroup-app` (port traits) and `lightgroup-domain` only.

mod light;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use lightgroup_app::ports::{ServiceDispatcher, StateReader};
use lightgroup_domain::entity::EntityState;
use lightgroup_domain::error::{DispatchError, LightGroupError, NotFoundError};
use lightgroup_domain::id::EntityId;
use lightgroup_domain::service::ServiceCall;

pub use light::VirtualLight;

/// A set of virtual lights keyed by entity id.
#[derive(Debug, Default)]
pub struct VirtualLights {
    lights: BTreeMap<EntityId, VirtualLight>,
    history: Mutex<Vec<ServiceCall>>,
}

impl VirtualLights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light, replacing any light with the same id.
    pub fn add(&mut self, entity_id: EntityId, state: EntityState) {
        let light = VirtualLight::new(entity_id.clone(), state);
        self.lights.insert(entity_id, light);
    }

    #[must_use]
    pub fn get(&self, entity_id: &EntityId) -> Option<&VirtualLight> {
        self.lights.get(entity_id)
    }

    /// All lights, sorted by entity id.
    pub fn iter(&self) -> impl Iterator<Item = &VirtualLight> {
        self.lights.values()
    }

    /// Current state of a light, `unknown` if there is no such light.
    #[must_use]
    pub fn state_of(&self, entity_id: &EntityId) -> EntityState {
        self.lights
            .get(entity_id)
            .map_or(EntityState::Unknown, VirtualLight::state)
    }

    /// Every call dispatched so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<ServiceCall> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, call: ServiceCall) -> Result<(), LightGroupError> {
        let mut lights = Vec::with_capacity(call.targets.len());
        for target in &call.targets {
            let light = self.lights.get(target).ok_or_else(|| NotFoundError {
                entity: "Light",
                id: target.to_string(),
            })?;
            if !light.is_reachable() {
                return Err(DispatchError {
                    service: call.service.as_str(),
                    target: target.to_string(),
                    reason: "light is unreachable".to_string(),
                }
                .into());
            }
            lights.push(light);
        }

        for light in lights {
            light.apply(call.service, &call.data);
            tracing::debug!(entity_id = %light.entity_id(), state = %light.state(), "virtual light updated");
        }
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        Ok(())
    }
}

impl FromIterator<(EntityId, EntityState)> for VirtualLights {
    fn from_iter<T: IntoIterator<Item = (EntityId, EntityState)>>(iter: T) -> Self {
        let mut lights = Self::new();
        for (entity_id, state) in iter {
            lights.add(entity_id, state);
        }
        lights
    }
}

impl StateReader for VirtualLights {
    fn read_state(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Option<EntityState>> + Send {
        let state = self.lights.get(entity_id).map(VirtualLight::state);
        async move { state }
    }
}

impl ServiceDispatcher for VirtualLights {
    fn dispatch(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), LightGroupError>> + Send {
        // applied synchronously, so a blocking call is complete once this returns
        let result = self.apply(call);
        async move { result }
    }
}
