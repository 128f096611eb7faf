//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lightgroup.toml` in the working directory, or the path in
//! `LIGHTGROUP_CONFIG`. Every section is optional so the file is too.
//! Environment variables take precedence over file values.

use std::collections::HashSet;

use serde::Deserialize;

use lightgroup_domain::entity::EntityState;
use lightgroup_domain::error::{LightGroupError, ValidationError};
use lightgroup_domain::group::LightGroup;
use lightgroup_domain::id::EntityId;

const DEFAULT_PATH: &str = "lightgroup.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Virtual member lights.
    pub lights: Vec<LightConfig>,
    /// Light groups.
    pub groups: Vec<GroupConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One virtual light.
#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub entity_id: EntityId,
    /// Initial state, `off` when omitted.
    #[serde(default = "default_light_state")]
    pub state: EntityState,
}

/// One light group, as written by the user.
#[derive(Debug, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub unique_id: Option<String>,
    pub entities: Vec<EntityId>,
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub stay_off: bool,
    #[serde(default)]
    pub prevent_off: bool,
}

impl GroupConfig {
    /// Convert into a validated [`LightGroup`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the group breaks a domain invariant.
    pub fn to_group(&self) -> Result<LightGroup, LightGroupError> {
        let mut builder = LightGroup::builder()
            .name(self.name.clone())
            .members(self.entities.iter().cloned())
            .all(self.all)
            .stay_off(self.stay_off)
            .prevent_off(self.prevent_off);
        if let Some(unique_id) = &self.unique_id {
            builder = builder.unique_id(unique_id.clone());
        }
        builder.build()
    }
}

fn default_light_state() -> EntityState {
    EntityState::Off
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if a group
    /// is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LIGHTGROUP_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a group is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LIGHTGROUP_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::with_capacity(self.groups.len());
        for group in &self.groups {
            group.to_group()?;
            if !names.insert(group.name.as_str()) {
                return Err(LightGroupError::from(ValidationError::DuplicateGroup(
                    group.name.clone(),
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lightgroupd=info,lightgroup=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A group breaks a domain invariant.
    #[error("invalid configuration")]
    Invalid(#[from] LightGroupError),
}
