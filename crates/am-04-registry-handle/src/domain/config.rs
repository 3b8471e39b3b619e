//! Registry configuration
//!
//! ```json
//! {
//!   "version": "2024-06",
//!   "default_ttl_secs": 1800,
//!   "privilege": { "default_level": 0, "users": { "1234": 5 } }
//! }
//! ```
//!
//! `version` may also be given as a JSON number.

use am_01_privilege_authority::PrivilegeConfig;
use am_03_component_registry::{ComponentConfig, CustomIdField};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Default instance TTL in seconds (30 minutes).
pub const DEFAULT_TTL_SECS: u64 = 30 * 60;

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Embedded in every minted custom id. Bump it to invalidate components
    /// minted by a previous deployment.
    #[serde(default, deserialize_with = "string_or_number")]
    pub version: String,
    /// TTL for component instances minted without an explicit one.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,
    #[serde(default)]
    pub privilege: PrivilegeConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            default_ttl_secs: DEFAULT_TTL_SECS,
            privilege: PrivilegeConfig::default(),
        }
    }
}

impl RegistryConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        CustomIdField::new(self.version.as_str())?;
        self.privilege.validate()?;
        Ok(())
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn component_config(&self) -> ComponentConfig {
        ComponentConfig::default()
            .with_version(self.version.clone())
            .with_default_ttl(self.default_ttl())
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_default_ttl_secs(mut self, secs: u64) -> Self {
        self.default_ttl_secs = secs;
        self
    }

    pub fn with_privilege(mut self, privilege: PrivilegeConfig) -> Self {
        self.privilege = privilege;
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Version::deserialize(deserializer)? {
        Version::Text(text) => text,
        Version::Number(number) => number.to_string(),
    })
}
