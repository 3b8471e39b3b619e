//! Error types for the Registry Handle

use am_01_privilege_authority::PrivilegeError;
use am_02_command_registry::CommandHandleError;
use am_03_component_registry::{ComponentHandleError, FieldError};
use shared_types::HandleErrorKind;
use thiserror::Error;

/// Any dispatch failure, passed through unchanged from the owning registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Command(#[from] CommandHandleError),

    #[error(transparent)]
    Component(#[from] ComponentHandleError),
}

impl RegistryError {
    pub fn kind(&self) -> HandleErrorKind {
        match self {
            Self::Command(err) => err.kind(),
            Self::Component(err) => err.kind(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid version tag: {0}")]
    InvalidVersion(#[from] FieldError),

    #[error("Invalid privilege configuration: {0}")]
    Privilege(#[from] PrivilegeError),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failures reported by a `CommandPublisher`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Platform rejected command bodies for {route} with status {status}: {message}")]
    Rejected {
        route: String,
        status: u16,
        message: String,
    },

    #[error("Failed to reach platform: {0}")]
    Transport(String),
}
