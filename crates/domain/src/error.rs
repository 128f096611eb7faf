//! Common error types used across the workspace.
//!
//! Each layer raises typed errors and converts into [`LightGroupError`]
//! via `#[from]`.

/// Top-level error for every fallible lightgroup operation.
#[derive(Debug, thiserror::Error)]
pub enum LightGroupError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("dispatch error")]
    Dispatch(#[from] DispatchError),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("a light group needs at least one member")]
    EmptyMembers,

    #[error("invalid entity id {0:?}")]
    InvalidEntityId(String),

    #[error("entity {0} is not a light")]
    NotALight(String),

    #[error("entity {0} is listed more than once")]
    DuplicateMember(String),

    #[error("a group named {0:?} already exists")]
    DuplicateGroup(String),

    #[error("unknown service {0:?}")]
    UnknownService(String),
}

/// A lookup by key found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The downstream command could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to dispatch {service} to {target}: {reason}")]
pub struct DispatchError {
    pub service: &'static str,
    pub target: String,
    pub reason: String,
}
