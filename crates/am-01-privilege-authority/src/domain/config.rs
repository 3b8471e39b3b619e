//! Privilege configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use am_01_privilege_authority::PrivilegeConfig;
//!
//! let config = PrivilegeConfig::from_json(r#"{ "default_level": 0, "users": { "1234": 5 } }"#)?;
//! ```

use serde::{Deserialize, Serialize};
use shared_types::PrivilegeLevel;
use std::collections::BTreeMap;

use crate::error::PrivilegeError;

/// Privilege table as loaded from configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeConfig {
    /// Level of users without an explicit entry (lowest level, 0, by default).
    #[serde(default)]
    pub default_level: PrivilegeLevel,
    /// Explicit levels keyed by raw user id.
    #[serde(default)]
    pub users: BTreeMap<String, PrivilegeLevel>,
}

impl PrivilegeConfig {
    /// Parse from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, PrivilegeError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PrivilegeError> {
        if self.users.keys().any(|id| id.trim().is_empty()) {
            return Err(PrivilegeError::EmptyUserId);
        }
        Ok(())
    }

    pub fn with_default_level(mut self, level: PrivilegeLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_user(mut self, id: impl Into<String>, level: PrivilegeLevel) -> Self {
        self.users.insert(id.into(), level);
        self
    }
}
