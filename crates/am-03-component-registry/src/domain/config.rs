//! Component registry configuration

use std::time::Duration;

use crate::domain::custom_id::CustomIdField;
use crate::error::FieldError;

/// Instances live for 30 minutes unless minted with an explicit TTL.
pub const DEFAULT_INSTANCE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Deployment version embedded in every minted custom id.
    pub version: String,
    /// TTL applied when a mint does not set one.
    pub default_ttl: Duration,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            version: String::new(),
            default_ttl: DEFAULT_INSTANCE_TTL,
        }
    }
}

impl ComponentConfig {
    /// The version must be usable as a custom id field.
    pub fn validate(&self) -> Result<(), FieldError> {
        CustomIdField::new(self.version.as_str())?;
        Ok(())
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}
