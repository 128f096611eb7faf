//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the host that
//! owns the member lights. A forwarder composes one of each instead of
//! extending a host entity type.

pub mod dispatcher;
pub mod state_reader;

pub use dispatcher::ServiceDispatcher;
pub use state_reader::StateReader;
