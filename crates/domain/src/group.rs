//! Light group — a named, ordered set of member lights plus the switches
//! that shape how commands reach them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entity::EntityState;
use crate::error::{LightGroupError, ValidationError};
use crate::id::EntityId;

/// Entity domain every member must belong to.
pub const LIGHT_DOMAIN: &str = "light";

/// A light group. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightGroup {
    pub name: String,
    pub unique_id: Option<String>,
    /// Members in declaration order.
    pub members: Vec<EntityId>,
    /// Report `on` only when every member is on.
    pub all: bool,
    /// Refuse to turn on while every member is off.
    pub stay_off: bool,
    /// Refuse every turn off.
    pub prevent_off: bool,
}

impl LightGroup {
    /// Create a builder for constructing a [`LightGroup`].
    #[must_use]
    pub fn builder() -> LightGroupBuilder {
        LightGroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// `stay_off` and `prevent_off` may both be set; such a group can
    /// never leave the all-off state through itself, and that is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`LightGroupError::Validation`] when the name is empty, there
    /// are no members, a member is not a light, or a member is repeated.
    pub fn validate(&self) -> Result<(), LightGroupError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.members.is_empty() {
            return Err(ValidationError::EmptyMembers.into());
        }
        let mut seen = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            if member.domain() != LIGHT_DOMAIN {
                return Err(ValidationError::NotALight(member.to_string()).into());
            }
            if !seen.insert(member) {
                return Err(ValidationError::DuplicateMember(member.to_string()).into());
            }
        }
        Ok(())
    }

    /// Aggregate member states into the group's own state.
    #[must_use]
    pub fn aggregate_state(&self, states: &[EntityState]) -> EntityState {
        aggregate_state(states, self.all)
    }
}

/// Combine member states into one group state.
///
/// `states` holds only the members the host has a state for. The group is
/// unavailable when none of them is reachable. Otherwise `all` picks the
/// quantifier: with `all`, every member must be on or off for the group to
/// be known, and every member must be on for it to be on; without `all`,
/// one known member is enough, and one lit member makes it on.
#[must_use]
pub fn aggregate_state(states: &[EntityState], all: bool) -> EntityState {
    let mode = |pred: fn(&EntityState) -> bool| {
        if all {
            states.iter().all(pred)
        } else {
            states.iter().any(pred)
        }
    };

    if !states.iter().any(|state| state.is_available()) {
        return EntityState::Unavailable;
    }
    if !mode(|state| matches!(state, EntityState::On | EntityState::Off)) {
        return EntityState::Unknown;
    }
    if mode(|state| state.is_on()) {
        EntityState::On
    } else {
        EntityState::Off
    }
}

/// Step-by-step builder for [`LightGroup`].
#[derive(Debug, Default)]
pub struct LightGroupBuilder {
    name: Option<String>,
    unique_id: Option<String>,
    members: Vec<EntityId>,
    all: bool,
    stay_off: bool,
    prevent_off: bool,
}

impl LightGroupBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn member(mut self, member: EntityId) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn members(mut self, members: impl IntoIterator<Item = EntityId>) -> Self {
        self.members.extend(members);
        self
    }

    #[must_use]
    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    #[must_use]
    pub fn stay_off(mut self, stay_off: bool) -> Self {
        self.stay_off = stay_off;
        self
    }

    #[must_use]
    pub fn prevent_off(mut self, prevent_off: bool) -> Self {
        self.prevent_off = prevent_off;
        self
    }

    /// Consume the builder, validate, and return a [`LightGroup`].
    ///
    /// # Errors
    ///
    /// Returns [`LightGroupError::Validation`] if any invariant fails.
    pub fn build(self) -> Result<LightGroup, LightGroupError> {
        let group = LightGroup {
            name: self.name.unwrap_or_default(),
            unique_id: self.unique_id,
            members: self.members,
            all: self.all,
            stay_off: self.stay_off,
            prevent_off: self.prevent_off,
        };
        group.validate()?;
        Ok(group)
    }
}
