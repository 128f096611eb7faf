//! Service — a command addressed to one or more lights.
//!
//! A group turns one request into at most one [`ServiceCall`] aimed at a
//! subset of its members.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::context::Context;
use crate::error::ValidationError;
use crate::id::EntityId;

/// Light power service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    TurnOn,
    TurnOff,
}

impl Service {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "turn_on",
            Self::TurnOff => "turn_off",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turn_on" => Ok(Self::TurnOn),
            "turn_off" => Ok(Self::TurnOff),
            other => Err(ValidationError::UnknownService(other.to_string())),
        }
    }
}

/// A single delegated command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub service: Service,
    pub targets: Vec<EntityId>,
    pub data: Attributes,
    pub context: Context,
    /// Caller waits for the command to complete before returning.
    pub blocking: bool,
}

impl ServiceCall {
    /// A blocking call of `service` on `targets`.
    #[must_use]
    pub fn blocking(
        service: Service,
        targets: Vec<EntityId>,
        data: Attributes,
        context: Context,
    ) -> Self {
        Self {
            service,
            targets,
            data,
            context,
            blocking: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_service_names() {
        assert_eq!("turn_on".parse::<Service>(), Ok(Service::TurnOn));
        assert_eq!("turn_off".parse::<Service>(), Ok(Service::TurnOff));
    }

    #[test]
    fn should_reject_unknown_service_name() {
        assert_eq!(
            "toggle".parse::<Service>(),
            Err(ValidationError::UnknownService("toggle".to_string()))
        );
    }

    #[test]
    fn should_serialize_service_as_snake_case() {
        let json = serde_json::to_string(&Service::TurnOff).unwrap();
        assert_eq!(json, "\"turn_off\"");
    }

    #[test]
    fn should_build_blocking_call() {
        let target: EntityId = "light.desk".parse().unwrap();
        let call = ServiceCall::blocking(
            Service::TurnOn,
            vec![target.clone()],
            Attributes::new(),
            Context::new(),
        );
        assert!(call.blocking);
        assert_eq!(call.targets, vec![target]);
    }
}
