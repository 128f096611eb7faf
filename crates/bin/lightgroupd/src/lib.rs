//! # lightgroupd
//!
//! Composition root that wires light groups to virtual lights.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Build the virtual lights adapter from the `[[lights]]` section
//! - Build one `SelectiveForwarder` per `[[groups]]` entry, injecting the
//!   adapter as both state reader and dispatcher
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;

use std::sync::Arc;

use lightgroup_adapter_virtual::VirtualLights;
use lightgroup_app::services::forwarder::SelectiveForwarder;
use lightgroup_app::services::registry::GroupRegistry;
use lightgroup_domain::error::LightGroupError;

use crate::config::Config;

/// Registry of groups backed by shared virtual lights.
pub type Registry = GroupRegistry<Arc<VirtualLights>, Arc<VirtualLights>>;

/// Build the virtual lights and the group registry described by `config`.
///
/// # Errors
///
/// Returns a validation error if a group is invalid or two groups share a name.
pub fn build(config: &Config) -> Result<(Arc<VirtualLights>, Registry), LightGroupError> {
    let lights: Arc<VirtualLights> = Arc::new(
        config
            .lights
            .iter()
            .map(|light| (light.entity_id.clone(), light.state))
            .collect(),
    );

    let mut registry = Registry::new();
    for group in &config.groups {
        let forwarder =
            SelectiveForwarder::new(group.to_group()?, Arc::clone(&lights), Arc::clone(&lights));
        registry.insert(forwarder)?;
    }
    tracing::info!(
        lights = config.lights.len(),
        groups = registry.len(),
        "light groups ready"
    );

    Ok((lights, registry))
}
