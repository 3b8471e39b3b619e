//! Privilege Authority
//!
//! Holds the user → level table and the default level. Read-only once built;
//! the registries share it behind an `Arc`.

use shared_types::{PrivilegeLevel, UserId};
use std::collections::HashMap;
use tracing::debug;

use crate::domain::config::PrivilegeConfig;
use crate::error::PrivilegeError;

/// Answers "does user U meet required level L".
#[derive(Debug, Clone, Default)]
pub struct PrivilegeAuthority {
    /// Explicit levels by user.
    levels: HashMap<UserId, PrivilegeLevel>,
    /// Level of every user not present in `levels`.
    default_level: PrivilegeLevel,
}

impl PrivilegeAuthority {
    /// Create an authority with no privileged users.
    pub fn new(default_level: PrivilegeLevel) -> Self {
        Self {
            levels: HashMap::new(),
            default_level,
        }
    }

    /// Build from validated configuration.
    pub fn from_config(config: &PrivilegeConfig) -> Result<Self, PrivilegeError> {
        config.validate()?;

        let levels: HashMap<UserId, PrivilegeLevel> = config
            .users
            .iter()
            .map(|(id, level)| (UserId::new(id.as_str()), *level))
            .collect();

        debug!(
            privileged_users = levels.len(),
            default_level = config.default_level,
            "Loaded privilege table"
        );

        Ok(Self {
            levels,
            default_level: config.default_level,
        })
    }

    /// Builder-style method to assign a level to a user.
    pub fn with_user(mut self, user: impl Into<UserId>, level: PrivilegeLevel) -> Self {
        self.levels.insert(user.into(), level);
        self
    }

    /// The level assigned to users absent from the table.
    pub fn default_level(&self) -> PrivilegeLevel {
        self.default_level
    }

    /// Configured level for `user`, or the default level.
    pub fn level_of(&self, user: &UserId) -> PrivilegeLevel {
        self.levels
            .get(user)
            .copied()
            .unwrap_or(self.default_level)
    }

    /// `level_of(user) >= required`.
    pub fn meets(&self, user: &UserId, required: PrivilegeLevel) -> bool {
        self.level_of(user) >= required
    }

    /// Whether a requirement is above what every user has by default.
    ///
    /// Commands gated above the default are published as admin commands.
    pub fn exceeds_default(&self, level: PrivilegeLevel) -> bool {
        level > self.default_level
    }

    /// Number of users with an explicit level.
    pub fn privileged_users(&self) -> usize {
        self.levels.len()
    }
}
