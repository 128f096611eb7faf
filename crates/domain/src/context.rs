//! Context — the causal origin of a command.
//!
//! Every call forwarded by a group carries a child of the context that
//! triggered it, so the host can trace it back and avoid loops.

use serde::{Deserialize, Serialize};

use crate::id::ContextId;
use crate::time::{Timestamp, now};

/// Causal context of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub id: ContextId,
    pub parent_id: Option<ContextId>,
    pub created_at: Timestamp,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            id: ContextId::new(),
            parent_id: None,
            created_at: now(),
        }
    }
}

impl Context {
    /// A fresh root context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A new context caused by this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            id: ContextId::new(),
            parent_id: Some(self.id),
            created_at: now(),
        }
    }
}
