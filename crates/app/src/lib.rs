//! # lightgroup-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StateReader` — current state of a member light
//!   - `ServiceDispatcher` — deliver one command to a list of member lights
//! - Define **driving/inbound** use-cases:
//!   - `SelectiveForwarder` — `turn_on` / `turn_off` for one group
//!   - `GroupRegistry` — route named commands to the right group
//! - Orchestrate domain decisions without knowing *how* state is read or
//!   commands are delivered
//!
//! ## Dependency rule
//! Depends on `lightgroup-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
