//! State reader port — observe member lights.

use std::future::Future;
use std::sync::Arc;

use lightgroup_domain::entity::EntityState;
use lightgroup_domain::id::EntityId;

/// Read-only view over the host's entity states.
///
/// Lookups never fail: an entity the host has no state for reads as `None`.
pub trait StateReader: Send + Sync {
    /// Current state of one entity.
    fn read_state(&self, entity_id: &EntityId)
    -> impl Future<Output = Option<EntityState>> + Send;

    /// Current state of every entity in `entity_ids`, in the same order.
    fn read_states(
        &self,
        entity_ids: &[EntityId],
    ) -> impl Future<Output = Vec<(EntityId, Option<EntityState>)>> + Send {
        async move {
            let mut observed = Vec::with_capacity(entity_ids.len());
            for entity_id in entity_ids {
                let state = self.read_state(entity_id).await;
                observed.push((entity_id.clone(), state));
            }
            observed
        }
    }
}

impl<T: StateReader> StateReader for Arc<T> {
    fn read_state(
        &self,
        entity_id: &EntityId,
    ) -> impl Future<Output = Option<EntityState>> + Send {
        (**self).read_state(entity_id)
    }

    fn read_states(
        &self,
        entity_ids: &[EntityId],
    ) -> impl Future<Output = Vec<(EntityId, Option<EntityState>)>> + Send {
        (**self).read_states(entity_ids)
    }
}
