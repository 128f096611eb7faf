//! Forwarding decision — which members a group command reaches.
//!
//! Pure functions over a group and a snapshot of member states. Performing
//! the reads and the dispatch is the job of the application layer.

use serde::{Deserialize, Serialize};

use crate::entity::EntityState;
use crate::group::LightGroup;
use crate::id::EntityId;

/// Why a command was not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// `turn_on` while every member is off and the group has `stay_off`.
    StayOff,
    /// `turn_off` on a group with `prevent_off`.
    PreventOff,
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StayOff => f.write_str("stay_off: every member is off"),
            Self::PreventOff => f.write_str("prevent_off"),
        }
    }
}

/// Result of planning one group command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Send one command to these members, in declaration order.
    Forward(Vec<EntityId>),
    /// Send nothing.
    Suppress(SuppressReason),
}

/// Plan a group `turn_on`.
///
/// `observed` holds one state per declared member, in declaration order.
/// Only [`EntityState::On`] counts as lit; unknown or unavailable members are
/// treated as off.
#[must_use]
pub fn plan_turn_on(group: &LightGroup, observed: &[(EntityId, EntityState)]) -> Decision {
    let lit: Vec<EntityId> = observed
        .iter()
        .filter(|(_, state)| state.is_on())
        .map(|(id, _)| id.clone())
        .collect();

    if !lit.is_empty() {
        return Decision::Forward(lit);
    }
    if group.stay_off {
        return Decision::Suppress(SuppressReason::StayOff);
    }
    // nothing lit: without this no member could ever be turned on through the group
    Decision::Forward(group.members.clone())
}

/// Plan a group `turn_off`. Member state is irrelevant.
#[must_use]
pub fn plan_turn_off(group: &LightGroup) -> Decision {
    if group.prevent_off {
        Decision::Suppress(SuppressReason::PreventOff)
    } else {
        Decision::Forward(group.members.clone())
    }
}
