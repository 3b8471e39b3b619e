//! Error types for the Privilege Authority

use thiserror::Error;

/// Errors raised while building a `PrivilegeAuthority` from configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrivilegeError {
    #[error("Privilege table contains an empty user id")]
    EmptyUserId,

    #[error("Failed to parse privilege configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for PrivilegeError {
    fn from(e: serde_json::Error) -> Self {
        PrivilegeError::Parse(e.to_string())
    }
}
