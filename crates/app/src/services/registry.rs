//! Group registry — every configured light group, addressed by name.

use std::collections::BTreeMap;

use lightgroup_domain::attributes::Attributes;
use lightgroup_domain::context::Context;
use lightgroup_domain::entity::EntityState;
use lightgroup_domain::error::{LightGroupError, NotFoundError, ValidationError};
use lightgroup_domain::service::Service;

use crate::ports::{ServiceDispatcher, StateReader};
use crate::services::forwarder::{Outcome, SelectiveForwarder};

/// Owns one [`SelectiveForwarder`] per group name.
pub struct GroupRegistry<S, D> {
    groups: BTreeMap<String, SelectiveForwarder<S, D>>,
}

impl<S, D> Default for GroupRegistry<S, D> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<S, D> GroupRegistry<S, D>
where
    S: StateReader,
    D: ServiceDispatcher,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateGroup`] when a group with the same
    /// name is already registered.
    pub fn insert(&mut self, forwarder: SelectiveForwarder<S, D>) -> Result<(), LightGroupError> {
        let name = forwarder.group().name.clone();
        if self.groups.contains_key(&name) {
            return Err(ValidationError::DuplicateGroup(name).into());
        }
        tracing::debug!(group = %name, members = forwarder.group().members.len(), "group registered");
        self.groups.insert(name, forwarder);
        Ok(())
    }

    /// Look up a group by name.
    ///
    /// # Errors
    ///
    /// Returns [`LightGroupError::NotFound`] when no group has that name.
    pub fn get(&self, name: &str) -> Result<&SelectiveForwarder<S, D>, LightGroupError> {
        self.groups.get(name).ok_or_else(|| {
            NotFoundError {
                entity: "Group",
                id: name.to_string(),
            }
            .into()
        })
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Run `service` on the group called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LightGroupError::NotFound`] for an unknown group, or the
    /// dispatcher's error unchanged.
    pub async fn call(
        &self,
        name: &str,
        service: Service,
        attributes: &Attributes,
        context: &Context,
    ) -> Result<Outcome, LightGroupError> {
        self.get(name)?.call(service, attributes, context).await
    }

    /// Aggregated state of every group, sorted by name.
    pub async fn states(&self) -> Vec<(String, EntityState)> {
        let mut states = Vec::with_capacity(self.groups.len());
        for (name, forwarder) in &self.groups {
            states.push((name.clone(), forwarder.state().await));
        }
        states
    }
}
