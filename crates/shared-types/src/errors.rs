//! # Error Kinds
//!
//! Stable, machine-readable kinds shared by every dispatch error. Each
//! registry crate has its own error enum; all of them map onto this
//! taxonomy through a `kind()` accessor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable classification of a dispatch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandleErrorKind {
    // Not found
    CommandNotFound,
    MenuNotFound,
    AutocompleteNotFound,
    ComponentNotFound,
    InstanceNotFound,

    // Authorization
    LackingPrivileges,
    DisallowedUser,

    // Protocol / versioning
    OutdatedComponentTriggered,
    GuildNotCached,

    // Diagnostic sentinel
    ThrowComponentTriggered,

    // Wrapped handler failures
    CommandThrown,
    AutocompleteThrown,
    MenuThrown,
    ComponentThrown,
}

/// Coarse grouping of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleErrorClass {
    NotFound,
    Authorization,
    Protocol,
    Diagnostic,
    HandlerFailed,
}

impl HandleErrorKind {
    /// Code string as reported to transports and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommandNotFound => "COMMAND_NOT_FOUND",
            Self::MenuNotFound => "MENU_NOT_FOUND",
            Self::AutocompleteNotFound => "AUTOCOMPLETE_NOT_FOUND",
            Self::ComponentNotFound => "COMPONENT_NOT_FOUND",
            Self::InstanceNotFound => "INSTANCE_NOT_FOUND",
            Self::LackingPrivileges => "LACKING_PRIVILEGES",
            Self::DisallowedUser => "DISALLOWED_USER",
            Self::OutdatedComponentTriggered => "OUTDATED_COMPONENT_TRIGGERED",
            Self::GuildNotCached => "GUILD_NOT_CACHED",
            Self::ThrowComponentTriggered => "THROW_COMPONENT_TRIGGERED",
            Self::CommandThrown => "COMMAND_THROWN",
            Self::AutocompleteThrown => "AUTOCOMPLETE_THROWN",
            Self::MenuThrown => "MENU_THROWN",
            Self::ComponentThrown => "COMPONENT_THROWN",
        }
    }

    pub const fn class(self) -> HandleErrorClass {
        match self {
            Self::CommandNotFound
            | Self::MenuNotFound
            | Self::AutocompleteNotFound
            | Self::ComponentNotFound
            | Self::InstanceNotFound => HandleErrorClass::NotFound,
            Self::LackingPrivileges | Self::DisallowedUser => HandleErrorClass::Authorization,
            Self::OutdatedComponentTriggered | Self::GuildNotCached => HandleErrorClass::Protocol,
            Self::ThrowComponentTriggered => HandleErrorClass::Diagnostic,
            Self::CommandThrown
            | Self::AutocompleteThrown
            | Self::MenuThrown
            | Self::ComponentThrown => HandleErrorClass::HandlerFailed,
        }
    }
}

impl fmt::Display for HandleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
