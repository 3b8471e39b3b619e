//! # Inbound Interactions
//!
//! Event payloads delivered by the transport layer. Every event carries the
//! acting user and, when it happened inside a guild, the guild context.
//!
//! `Interaction` is internally tagged by `"kind"` so a transport can feed raw
//! JSON straight into the registry; unrecognised kinds decode to
//! `Interaction::Unknown` and are ignored by dispatch.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{ComponentKind, ContextMenuKind, GuildId, UserId};

/// Guild an interaction was used in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildContext {
    /// Guild identifier.
    pub id: GuildId,
    /// Whether member and role data for the guild is available locally.
    #[serde(default)]
    pub cached: bool,
}

impl GuildContext {
    /// A guild whose member data is available.
    pub fn cached(id: impl Into<String>) -> Self {
        Self {
            id: GuildId::new(id),
            cached: true,
        }
    }

    /// A guild known only by id.
    pub fn uncached(id: impl Into<String>) -> Self {
        Self {
            id: GuildId::new(id),
            cached: false,
        }
    }
}

/// Common accessors for every interaction payload.
pub trait InteractionMeta {
    /// Platform interaction id.
    fn interaction_id(&self) -> &str;

    /// The acting user.
    fn user(&self) -> &UserId;

    /// Guild context, absent for direct messages.
    fn guild(&self) -> Option<&GuildContext>;

    /// True when the interaction comes from a guild with cached member data.
    fn in_cached_guild(&self) -> bool {
        self.guild().is_some_and(|g| g.cached)
    }
}

/// Interactions that resolve against the command table.
pub trait CommandPath: InteractionMeta {
    fn command_name(&self) -> &str;
    fn subcommand_group(&self) -> Option<&str>;
    fn subcommand(&self) -> Option<&str>;
}

/// Interactions that carry a custom identifier minted by the component registry.
pub trait CustomIdSource: InteractionMeta {
    fn custom_id(&self) -> &str;
}

/// A slash-command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInputEvent {
    pub id: String,
    pub user: UserId,
    #[serde(default)]
    pub guild: Option<GuildContext>,
    pub command_name: String,
    #[serde(default)]
    pub subcommand_group: Option<String>,
    #[serde(default)]
    pub subcommand: Option<String>,
    /// Resolved option values, passed through untouched.
    #[serde(default)]
    pub options: serde_json::Value,
}

impl ChatInputEvent {
    /// Minimal root-command invocation, mainly for tests and demos.
    pub fn new(id: impl Into<String>, user: impl Into<UserId>, command_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            guild: None,
            command_name: command_name.into(),
            subcommand_group: None,
            subcommand: None,
            options: serde_json::Value::Null,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.subcommand_group = Some(group.into());
        self
    }

    pub fn with_subcommand(mut self, sub: impl Into<String>) -> Self {
        self.subcommand = Some(sub.into());
        self
    }

    pub fn in_guild(mut self, guild: GuildContext) -> Self {
        self.guild = Some(guild);
        self
    }
}

/// The option currently being typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedOption {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// An autocomplete request for one of a command's options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteEvent {
    pub id: String,
    pub user: UserId,
    #[serde(default)]
    pub guild: Option<GuildContext>,
    pub command_name: String,
    #[serde(default)]
    pub subcommand_group: Option<String>,
    #[serde(default)]
    pub subcommand: Option<String>,
    pub focused: FocusedOption,
}

impl AutocompleteEvent {
    pub fn new(
        id: impl Into<String>,
        user: impl Into<UserId>,
        command_name: impl Into<String>,
        focused: FocusedOption,
    ) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            guild: None,
            command_name: command_name.into(),
            subcommand_group: None,
            subcommand: None,
            focused,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.subcommand_group = Some(group.into());
        self
    }

    pub fn with_subcommand(mut self, sub: impl Into<String>) -> Self {
        self.subcommand = Some(sub.into());
        self
    }
}

/// A context-menu activation on a user or a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuEvent {
    pub id: String,
    pub user: UserId,
    #[serde(default)]
    pub guild: Option<GuildContext>,
    pub command_name: String,
    pub target_kind: ContextMenuKind,
    pub target_id: String,
}

/// A button press or select-menu submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEvent {
    pub id: String,
    pub user: UserId,
    #[serde(default)]
    pub guild: Option<GuildContext>,
    pub custom_id: String,
    pub component_kind: ComponentKind,
    /// Selected values for select menus; empty for buttons.
    #[serde(default)]
    pub values: Vec<String>,
}

impl ComponentEvent {
    pub fn button(id: impl Into<String>, user: impl Into<UserId>, custom_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            guild: None,
            custom_id: custom_id.into(),
            component_kind: ComponentKind::Button,
            values: Vec::new(),
        }
    }

    pub fn in_guild(mut self, guild: GuildContext) -> Self {
        self.guild = Some(guild);
        self
    }
}

/// A modal form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSubmitEvent {
    pub id: String,
    pub user: UserId,
    #[serde(default)]
    pub guild: Option<GuildContext>,
    pub custom_id: String,
    /// Text-input values keyed by their input custom id.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl ModalSubmitEvent {
    pub fn new(id: impl Into<String>, user: impl Into<UserId>, custom_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            guild: None,
            custom_id: custom_id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn in_guild(mut self, guild: GuildContext) -> Self {
        self.guild = Some(guild);
        self
    }
}

/// Any inbound interaction, classified by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    Autocomplete(AutocompleteEvent),
    ChatInput(ChatInputEvent),
    ContextMenu(ContextMenuEvent),
    Component(ComponentEvent),
    ModalSubmit(ModalSubmitEvent),
    #[serde(other)]
    Unknown,
}

impl Interaction {
    /// Short label for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Autocomplete(_) => "autocomplete",
            Self::ChatInput(_) => "chat_input",
            Self::ContextMenu(_) => "context_menu",
            Self::Component(_) => "component",
            Self::ModalSubmit(_) => "modal_submit",
            Self::Unknown => "unknown",
        }
    }
}

/// Result of a dispatch that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered handler ran to completion.
    Handled,
    /// The interaction was not addressed to this registry and was skipped.
    Ignored,
}

impl DispatchOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

impl InteractionMeta for ChatInputEvent {
    fn interaction_id(&self) -> &str {
        &self.id
    }
    fn user(&self) -> &UserId {
        &self.user
    }
    fn guild(&self) -> Option<&GuildContext> {
        self.guild.as_ref()
    }
}

impl CommandPath for ChatInputEvent {
    fn command_name(&self) -> &str {
        &self.command_name
    }
    fn subcommand_group(&self) -> Option<&str> {
        self.subcommand_group.as_deref()
    }
    fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }
}

impl InteractionMeta for AutocompleteEvent {
    fn interaction_id(&self) -> &str {
        &self.id
    }
    fn user(&self) -> &UserId {
        &self.user
    }
    fn guild(&self) -> Option<&GuildContext> {
        self.guild.as_ref()
    }
}

impl CommandPath for AutocompleteEvent {
    fn command_name(&self) -> &str {
        &self.command_name
    }
    fn subcommand_group(&self) -> Option<&str> {
        self.subcommand_group.as_deref()
    }
    fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }
}

impl InteractionMeta for ContextMenuEvent {
    fn interaction_id(&self) -> &str {
        &self.id
    }
    fn user(&self) -> &UserId {
        &self.user
    }
    fn guild(&self) -> Option<&GuildContext> {
        self.guild.as_ref()
    }
}

impl InteractionMeta for ComponentEvent {
    fn interaction_id(&self) -> &str {
        &self.id
    }
    fn user(&self) -> &UserId {
        &self.user
    }
    fn guild(&self) -> Option<&GuildContext> {
        self.guild.as_ref()
    }
}

impl CustomIdSource for ComponentEvent {
    fn custom_id(&self) -> &str {
        &self.custom_id
    }
}

impl InteractionMeta for ModalSubmitEvent {
    fn interaction_id(&self) -> &str {
        &self.id
    }
    fn user(&self) -> &UserId {
        &self.user
    }
    fn guild(&self) -> Option<&GuildContext> {
        self.guild.as_ref()
    }
}

impl CustomIdSource for ModalSubmitEvent {
    fn custom_id(&self) -> &str {
        &self.custom_id
    }
}
