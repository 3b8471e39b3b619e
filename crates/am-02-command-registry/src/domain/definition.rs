//! Registration inputs and stored definitions
//!
//! Command bodies are opaque JSON handed to the platform as-is; the registry
//! only reads the `"name"` field to build keys.

use serde::Serialize;
use serde_json::Value;
use shared_types::PrivilegeLevel;
use std::fmt;
use std::sync::Arc;

use crate::domain::key::validate_segment;
use crate::error::{KeyError, RegistrationError};
use crate::ports::{AutocompleteHandler, CommandHandler, ContextMenuHandler};

/// Read the `"name"` field of a command body.
pub fn command_name(data: &Value) -> Result<&str, RegistrationError> {
    data.get("name")
        .and_then(Value::as_str)
        .ok_or(RegistrationError::MissingName)
}

/// A resolved command or subcommand, immutable once stored.
#[derive(Clone)]
pub struct CommandDefinition {
    pub execute: Arc<dyn CommandHandler>,
    pub autocomplete: Option<Arc<dyn AutocompleteHandler>>,
    /// Effective level after precedence was applied at registration.
    pub required_privilege_level: PrivilegeLevel,
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("has_autocomplete", &self.autocomplete.is_some())
            .field("required_privilege_level", &self.required_privilege_level)
            .finish()
    }
}

/// A resolved context menu.
#[derive(Clone)]
pub struct ContextMenuDefinition {
    pub execute: Arc<dyn ContextMenuHandler>,
    pub required_privilege_level: PrivilegeLevel,
}

impl fmt::Debug for ContextMenuDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuDefinition")
            .field("required_privilege_level", &self.required_privilege_level)
            .finish()
    }
}

/// A body ready to post to the platform, tagged with whether it is gated
/// above the default level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedCommandBody {
    pub body: Value,
    pub admin: bool,
}

/// A root command with no subcommands.
#[derive(Clone)]
pub struct RegisterCommand {
    pub data: Value,
    pub execute: Arc<dyn CommandHandler>,
    pub autocomplete: Option<Arc<dyn AutocompleteHandler>>,
    pub required_privilege_level: Option<PrivilegeLevel>,
}

impl RegisterCommand {
    pub fn new(data: Value, execute: impl CommandHandler + 'static) -> Self {
        Self {
            data,
            execute: Arc::new(execute),
            autocomplete: None,
            required_privilege_level: None,
        }
    }

    pub fn with_autocomplete(mut self, handler: impl AutocompleteHandler + 'static) -> Self {
        self.autocomplete = Some(Arc::new(handler));
        self
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.required_privilege_level = Some(level);
        self
    }
}

/// A subcommand description, before validation.
#[derive(Clone)]
pub struct RegisterSubcommand {
    pub name: String,
    pub execute: Arc<dyn CommandHandler>,
    pub autocomplete: Option<Arc<dyn AutocompleteHandler>>,
    /// Overrides the grouped command's level when set.
    pub required_privilege_level: Option<PrivilegeLevel>,
}

impl RegisterSubcommand {
    pub fn new(name: impl Into<String>, execute: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into(),
            execute: Arc::new(execute),
            autocomplete: None,
            required_privilege_level: None,
        }
    }

    pub fn with_autocomplete(mut self, handler: impl AutocompleteHandler + 'static) -> Self {
        self.autocomplete = Some(Arc::new(handler));
        self
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.required_privilege_level = Some(level);
        self
    }
}

/// A subcommand whose name is known to be a valid key segment.
#[derive(Clone)]
pub struct SubcommandReference(RegisterSubcommand);

impl SubcommandReference {
    pub fn new(subcommand: RegisterSubcommand) -> Result<Self, KeyError> {
        validate_segment(&subcommand.name)?;
        Ok(Self(subcommand))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn required_privilege_level(&self) -> Option<PrivilegeLevel> {
        self.0.required_privilege_level
    }

    /// Resolve into a stored definition given the inherited level.
    pub(crate) fn into_definition(self, inherited: PrivilegeLevel) -> CommandDefinition {
        let RegisterSubcommand {
            execute,
            autocomplete,
            required_privilege_level,
            ..
        } = self.0;
        CommandDefinition {
            execute,
            autocomplete,
            required_privilege_level: required_privilege_level.unwrap_or(inherited),
        }
    }
}

impl fmt::Debug for SubcommandReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubcommandReference")
            .field("name", &self.0.name)
            .field("required_privilege_level", &self.0.required_privilege_level)
            .finish()
    }
}

/// A named group of subcommands.
#[derive(Clone, Debug)]
pub struct SubcommandGroup {
    pub name: String,
    pub subcommands: Vec<SubcommandReference>,
}

impl SubcommandGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcommands: Vec::new(),
        }
    }

    pub fn with_subcommand(mut self, subcommand: SubcommandReference) -> Self {
        self.subcommands.push(subcommand);
        self
    }
}

/// A root command made of groups and/or flat subcommands.
#[derive(Clone, Debug)]
pub struct RegisterGroupedCommand {
    pub data: Value,
    /// Inherited by every subcommand that does not set its own level.
    pub required_privilege_level: Option<PrivilegeLevel>,
    pub groups: Vec<SubcommandGroup>,
    pub subcommands: Vec<SubcommandReference>,
}

impl RegisterGroupedCommand {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            required_privilege_level: None,
            groups: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.required_privilege_level = Some(level);
        self
    }

    pub fn with_group(mut self, group: SubcommandGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_subcommand(mut self, subcommand: SubcommandReference) -> Self {
        self.subcommands.push(subcommand);
        self
    }
}

/// A user or message context menu.
#[derive(Clone)]
pub struct RegisterContextMenu {
    pub data: Value,
    pub execute: Arc<dyn ContextMenuHandler>,
    pub required_privilege_level: Option<PrivilegeLevel>,
}

impl RegisterContextMenu {
    pub fn new(data: Value, execute: impl ContextMenuHandler + 'static) -> Self {
        Self {
            data,
            execute: Arc::new(execute),
            required_privilege_level: None,
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.required_privilege_level = Some(level);
        self
    }
}
