//! Error types for the Component Registry

use shared_types::{HandleErrorKind, UserId};
use thiserror::Error;

use crate::domain::TemplateKind;

/// Boxed error carried as the cause of `ComponentThrown`.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A custom-id field that would corrupt the joined token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Custom id field is empty")]
    Empty,

    #[error("Custom id field \"{value}\" contains the separator '{separator}'")]
    ContainsSeparator { value: String, separator: char },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid template identifier: {0}")]
    InvalidIdentifier(#[from] FieldError),

    #[error("A component is already registered under identifier \"{identifier}\"")]
    DuplicateComponent { identifier: String },

    #[error("A modal is already registered under identifier \"{identifier}\"")]
    DuplicateModal { identifier: String },
}

impl RegistrationError {
    pub(crate) fn duplicate(kind: TemplateKind, identifier: &str) -> Self {
        let identifier = identifier.to_string();
        match kind {
            TemplateKind::Component => Self::DuplicateComponent { identifier },
            TemplateKind::Modal => Self::DuplicateModal { identifier },
        }
    }
}

/// Errors from minting a custom id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("Invalid instance id: {0}")]
    InvalidInstanceId(#[from] FieldError),

    #[error("Custom id is {len} characters, the platform limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// Errors raised while dispatching a component or modal interaction.
#[derive(Debug, Error)]
pub enum ComponentHandleError {
    #[error("Interaction with custom id \"{custom_id}\" did not come from a cached guild")]
    GuildNotCached { custom_id: String },

    #[error("Throw component triggered")]
    ThrowComponentTriggered { custom_id: String },

    #[error("Custom id \"{custom_id}\" was minted for version \"{minted}\", current version is \"{current}\"")]
    OutdatedComponentTriggered {
        custom_id: String,
        minted: String,
        current: String,
    },

    #[error("Failed to find {kind} matching identifier \"{identifier}\"")]
    ComponentNotFound {
        identifier: String,
        kind: TemplateKind,
    },

    #[error("Failed to find instance \"{instance_id}\" of {kind} \"{identifier}\"")]
    InstanceNotFound {
        identifier: String,
        instance_id: String,
        kind: TemplateKind,
    },

    #[error("User {user} is not allowed to use instance \"{instance_id}\" owned by {owner}")]
    DisallowedUser {
        user: UserId,
        owner: UserId,
        instance_id: String,
    },

    #[error("The handler for {kind} matching identifier \"{identifier}\" threw an error")]
    ComponentThrown {
        identifier: String,
        kind: TemplateKind,
        #[source]
        source: HandlerError,
    },
}

impl ComponentHandleError {
    pub fn kind(&self) -> HandleErrorKind {
        match self {
            Self::GuildNotCached { .. } => HandleErrorKind::GuildNotCached,
            Self::ThrowComponentTriggered { .. } => HandleErrorKind::ThrowComponentTriggered,
            Self::OutdatedComponentTriggered { .. } => HandleErrorKind::OutdatedComponentTriggered,
            Self::ComponentNotFound { .. } => HandleErrorKind::ComponentNotFound,
            Self::InstanceNotFound { .. } => HandleErrorKind::InstanceNotFound,
            Self::DisallowedUser { .. } => HandleErrorKind::DisallowedUser,
            Self::ComponentThrown { .. } => HandleErrorKind::ComponentThrown,
        }
    }
}
