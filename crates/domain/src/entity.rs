//! Entity — an observable member of a light group.
//!
//! Only the state of an entity matters here; its identity is an
//! [`EntityId`](crate::id::EntityId).

mod state;

pub use state::EntityState;
