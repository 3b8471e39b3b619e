//! # Core Domain Entities
//!
//! Identities and platform constants shared by every registry crate.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `GuildId`, `PrivilegeLevel`
//! - **Platform constants**: `ComponentKind`, `CommandOptionType`,
//!   `ContextMenuKind`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Integer privilege level. Higher means more capable; 0 is the lowest.
pub type PrivilegeLevel = u32;

/// Stable identifier of the acting user (a platform snowflake).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw platform identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of the guild (server) an interaction originated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(String);

impl GuildId {
    /// Wrap a raw platform identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuildId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// CLUSTER B: PLATFORM CONSTANTS
// =============================================================================

/// Kind of interactive element a component template renders as.
///
/// Discriminants match the platform's numeric component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Button = 2,
    StringSelect = 3,
    TextInput = 4,
    UserSelect = 5,
    RoleSelect = 6,
    MentionableSelect = 7,
    ChannelSelect = 8,
}

impl ComponentKind {
    /// Platform numeric value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this kind is a select menu of any flavour.
    pub const fn is_select(self) -> bool {
        matches!(
            self,
            Self::StringSelect
                | Self::UserSelect
                | Self::RoleSelect
                | Self::MentionableSelect
                | Self::ChannelSelect
        )
    }
}

/// Option types used when building slash-command bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOptionType {
    Subcommand = 1,
    SubcommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl CommandOptionType {
    /// Platform numeric value, as it appears in a command body's `type` field.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Target of a context-menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMenuKind {
    User,
    Message,
}

impl ContextMenuKind {
    /// Platform application-command type for this menu.
    pub const fn command_type(self) -> u8 {
        match self {
            Self::User => 2,
            Self::Message => 3,
        }
    }
}
