//! # lightgroup-domain
//!
//! Pure domain model for selective light groups.
//!
//! ## Responsibilities
//! - Foundational types: entity identifiers, causal contexts, error conventions, timestamps
//! - Define **Entity states** (`on`, `off`, `unknown`, `unavailable`) as observed on members
//! - Define **Attributes** (opaque forwarded payload) and which keys a group forwards
//! - Define **Service calls** (`turn_on`, `turn_off`) addressed to member lights
//! - Define **Light groups** (members plus the `all`, `stay_off` and `prevent_off` switches)
//! - Contain the forwarding decision and the group state aggregation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod attributes;
pub mod context;
pub mod decision;
pub mod entity;
pub mod group;
pub mod service;
