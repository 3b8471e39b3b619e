//! Error types for the Command Registry

use shared_types::{HandleErrorKind, PrivilegeLevel, UserId};
use thiserror::Error;

/// Boxed error carried as the cause of a `*Thrown` variant.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from building a command key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Command key segment is empty")]
    EmptySegment,

    #[error("Command key segment \"{segment}\" contains the separator '{separator}'")]
    ContainsSeparator { segment: String, separator: char },
}

/// Errors raised while registering commands. Registration never overwrites.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Command data has no string \"name\" field")]
    MissingName,

    #[error("Invalid command key: {0}")]
    InvalidSegment(#[from] KeyError),

    #[error("A command is already registered under key \"{key}\"")]
    DuplicateCommand { key: String },

    #[error("A context menu is already registered under name \"{name}\"")]
    DuplicateContextMenu { name: String },
}

/// Errors raised while dispatching a command interaction.
#[derive(Debug, Error)]
pub enum CommandHandleError {
    #[error("Failed to find command matching key \"{key}\" when processing {during}")]
    CommandNotFound { key: String, during: &'static str },

    #[error("Failed to find context menu matching key \"{key}\" when processing")]
    MenuNotFound { key: String },

    #[error("No autocomplete handler found on command \"{key}\"")]
    AutocompleteNotFound { key: String },

    #[error("User {user} is missing privilege level {required} to {action} \"{key}\"")]
    LackingPrivileges {
        user: UserId,
        required: PrivilegeLevel,
        key: String,
        action: &'static str,
    },

    #[error("The execute handler for command matching key \"{key}\" threw an error")]
    CommandThrown {
        key: String,
        #[source]
        source: HandlerError,
    },

    #[error("The autocomplete handler for command \"{key}\" threw an error while executing")]
    AutocompleteThrown {
        key: String,
        #[source]
        source: HandlerError,
    },

    #[error("The execute handler for context menu matching key \"{key}\" threw an error")]
    MenuThrown {
        key: String,
        #[source]
        source: HandlerError,
    },
}

impl CommandHandleError {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> HandleErrorKind {
        match self {
            Self::CommandNotFound { .. } => HandleErrorKind::CommandNotFound,
            Self::MenuNotFound { .. } => HandleErrorKind::MenuNotFound,
            Self::AutocompleteNotFound { .. } => HandleErrorKind::AutocompleteNotFound,
            Self::LackingPrivileges { .. } => HandleErrorKind::LackingPrivileges,
            Self::CommandThrown { .. } => HandleErrorKind::CommandThrown,
            Self::AutocompleteThrown { .. } => HandleErrorKind::AutocompleteThrown,
            Self::MenuThrown { .. } => HandleErrorKind::MenuThrown,
        }
    }

    /// The key or name the failing dispatch resolved against.
    pub fn key(&self) -> &str {
        match self {
            Self::CommandNotFound { key, .. }
            | Self::MenuNotFound { key }
            | Self::AutocompleteNotFound { key }
            | Self::LackingPrivileges { key, .. }
            | Self::CommandThrown { key, .. }
            | Self::AutocompleteThrown { key, .. }
            | Self::MenuThrown { key, .. } => key,
        }
    }
}
