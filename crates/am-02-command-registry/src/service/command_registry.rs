//! Command Registry Service
//!
//! Owns the command and context-menu tables and the list of published bodies.
//! Tables are filled through `&mut self` at startup and only read afterwards,
//! so the registry is shared behind an `Arc` once dispatch begins.

use am_01_privilege_authority::PrivilegeAuthority;
use async_trait::async_trait;
use shared_types::{
    AutocompleteEvent, ChatInputEvent, CommandPath, ContextMenuEvent, DispatchOutcome,
    Interaction, InteractionMeta, PrivilegeLevel, UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{
    command_name, CommandDefinition, CommandKey, ContextMenuDefinition, PublishedCommandBody,
    RegisterCommand, RegisterContextMenu, RegisterGroupedCommand, RegisterSubcommand,
    SubcommandReference, KEY_SEPARATOR,
};
use crate::error::{CommandHandleError, RegistrationError};
use crate::ports::CommandDispatchApi;

/// Keyed command and context-menu routing with privilege gating.
pub struct CommandRegistry {
    authority: Arc<PrivilegeAuthority>,
    commands: HashMap<CommandKey, CommandDefinition>,
    context_menus: HashMap<String, ContextMenuDefinition>,
    /// Root names already published; one body per root.
    roots: HashSet<String>,
    published: Vec<PublishedCommandBody>,
}

impl CommandRegistry {
    pub fn new(authority: Arc<PrivilegeAuthority>) -> Self {
        Self {
            authority,
            commands: HashMap::new(),
            context_menus: HashMap::new(),
            roots: HashSet::new(),
            published: Vec::new(),
        }
    }

    pub fn authority(&self) -> &Arc<PrivilegeAuthority> {
        &self.authority
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a root command. Returns the key it resolves under.
    pub fn register_command(
        &mut self,
        command: RegisterCommand,
    ) -> Result<CommandKey, RegistrationError> {
        let RegisterCommand {
            data,
            execute,
            autocomplete,
            required_privilege_level,
        } = command;

        let key = CommandKey::root(command_name(&data)?)?;
        self.claim_root(key.root_name())?;

        let level = required_privilege_level.unwrap_or(self.authority.default_level());
        let admin = self.authority.exceeds_default(level);

        self.commands.insert(
            key.clone(),
            CommandDefinition {
                execute,
                autocomplete,
                required_privilege_level: level,
            },
        );
        self.published.push(PublishedCommandBody { body: data, admin });

        debug!(key = %key, level, admin, "Registered command");
        Ok(key)
    }

    /// Register a command made of groups and/or flat subcommands.
    ///
    /// All keys are validated before anything is inserted, so a failed
    /// registration leaves the tables untouched.
    pub fn register_grouped_command(
        &mut self,
        command: RegisterGroupedCommand,
    ) -> Result<Vec<CommandKey>, RegistrationError> {
        let RegisterGroupedCommand {
            data,
            required_privilege_level,
            groups,
            subcommands,
        } = command;

        let root = command_name(&data)?.to_string();
        CommandKey::root(&root)?;
        if self.roots.contains(&root) {
            return Err(RegistrationError::DuplicateCommand { key: root });
        }

        let inherited = required_privilege_level.unwrap_or(self.authority.default_level());

        let mut staged: Vec<(CommandKey, SubcommandReference)> = Vec::new();
        for group in groups {
            CommandKey::new(&root, Some(&group.name), None)?;
            for sub in group.subcommands {
                staged.push((CommandKey::grouped(&root, &group.name, sub.name())?, sub));
            }
        }
        for sub in subcommands {
            staged.push((CommandKey::subcommand(&root, sub.name())?, sub));
        }

        let mut seen = HashSet::with_capacity(staged.len());
        for (key, _) in &staged {
            if self.commands.contains_key(key) || !seen.insert(key) {
                return Err(RegistrationError::DuplicateCommand {
                    key: key.to_string(),
                });
            }
        }

        let mut admin = self.authority.exceeds_default(inherited);
        let mut keys = Vec::with_capacity(staged.len());
        for (key, sub) in staged {
            let definition = sub.into_definition(inherited);
            admin |= self.authority.exceeds_default(definition.required_privilege_level);
            debug!(
                key = %key,
                level = definition.required_privilege_level,
                "Registered subcommand"
            );
            self.commands.insert(key.clone(), definition);
            keys.push(key);
        }

        self.roots.insert(root.clone());
        self.published.push(PublishedCommandBody { body: data, admin });

        debug!(root = %root, subcommands = keys.len(), admin, "Registered grouped command");
        Ok(keys)
    }

    /// Register a user or message context menu under its name.
    pub fn register_context_menu(
        &mut self,
        menu: RegisterContextMenu,
    ) -> Result<String, RegistrationError> {
        let RegisterContextMenu {
            data,
            execute,
            required_privilege_level,
        } = menu;

        let name = command_name(&data)?.to_string();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if self.context_menus.contains_key(&name) {
            return Err(RegistrationError::DuplicateContextMenu { name });
        }

        let level = required_privilege_level.unwrap_or(self.authority.default_level());
        let admin = self.authority.exceeds_default(level);

        self.context_menus.insert(
            name.clone(),
            ContextMenuDefinition {
                execute,
                required_privilege_level: level,
            },
        );
        self.published.push(PublishedCommandBody { body: data, admin });

        debug!(name = %name, level, admin, "Registered context menu");
        Ok(name)
    }

    /// Validate a subcommand description for use in a grouped registration.
    /// Registers nothing.
    pub fn generate_subcommand(
        &self,
        subcommand: RegisterSubcommand,
    ) -> Result<SubcommandReference, RegistrationError> {
        Ok(SubcommandReference::new(subcommand)?)
    }

    fn claim_root(&mut self, root: &str) -> Result<(), RegistrationError> {
        if !self.roots.insert(root.to_string()) {
            return Err(RegistrationError::DuplicateCommand {
                key: root.to_string(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn resolve(&self, key: &CommandKey) -> Option<&CommandDefinition> {
        self.commands.get(key)
    }

    pub fn resolve_context_menu(&self, name: &str) -> Option<&ContextMenuDefinition> {
        self.context_menus.get(name)
    }

    /// Published bodies in registration order.
    pub fn published(&self) -> &[PublishedCommandBody] {
        &self.published
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn context_menu_count(&self) -> usize {
        self.context_menus.len()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub async fn handle_autocomplete(
        &self,
        event: &AutocompleteEvent,
    ) -> Result<(), CommandHandleError> {
        let (key, definition) = self.lookup(event, "autocomplete")?;

        let Some(handler) = definition.autocomplete.as_ref() else {
            debug!(key = %key, "Command has no autocomplete handler");
            return Err(CommandHandleError::AutocompleteNotFound { key });
        };

        self.gate(
            event.user(),
            definition.required_privilege_level,
            &key,
            "autocomplete privileged command",
        )?;

        handler
            .autocomplete(event)
            .await
            .map_err(|source| CommandHandleError::AutocompleteThrown {
                key: key.clone(),
                source: source.into(),
            })?;

        debug!(key = %key, focused = %event.focused.name, "Handled autocomplete");
        Ok(())
    }

    pub async fn handle_chat_input(&self, event: &ChatInputEvent) -> Result<(), CommandHandleError> {
        let (key, definition) = self.lookup(event, "command")?;

        self.gate(
            event.user(),
            definition.required_privilege_level,
            &key,
            "execute privileged command",
        )?;

        definition
            .execute
            .execute(event)
            .await
            .map_err(|source| CommandHandleError::CommandThrown {
                key: key.clone(),
                source: source.into(),
            })?;

        debug!(key = %key, user = %event.user, "Handled command");
        Ok(())
    }

    pub async fn handle_context_menu(
        &self,
        event: &ContextMenuEvent,
    ) -> Result<(), CommandHandleError> {
        let Some(definition) = self.context_menus.get(&event.command_name) else {
            debug!(name = %event.command_name, "Context menu not found");
            return Err(CommandHandleError::MenuNotFound {
                key: event.command_name.clone(),
            });
        };
        let key = event.command_name.as_str();

        self.gate(
            event.user(),
            definition.required_privilege_level,
            key,
            "execute privileged context menu",
        )?;

        definition
            .execute
            .execute(event)
            .await
            .map_err(|source| CommandHandleError::MenuThrown {
                key: key.to_string(),
                source: source.into(),
            })?;

        debug!(name = %key, target = %event.target_id, "Handled context menu");
        Ok(())
    }

    /// Route a command-family interaction; other kinds are ignored.
    pub async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, CommandHandleError> {
        match interaction {
            Interaction::Autocomplete(event) => self.handle_autocomplete(event).await?,
            Interaction::ChatInput(event) => self.handle_chat_input(event).await?,
            Interaction::ContextMenu(event) => self.handle_context_menu(event).await?,
            other => {
                debug!(kind = other.kind_name(), "Ignoring non-command interaction");
                return Ok(DispatchOutcome::Ignored);
            }
        }
        Ok(DispatchOutcome::Handled)
    }

    fn lookup<P: CommandPath>(
        &self,
        event: &P,
        during: &'static str,
    ) -> Result<(String, &CommandDefinition), CommandHandleError> {
        let found = CommandKey::from_path(event)
            .ok()
            .and_then(|key| self.commands.get(&key).map(|def| (key, def)));

        match found {
            Some((key, definition)) => Ok((key.to_string(), definition)),
            None => {
                let key = raw_path(event);
                debug!(key = %key, during, "Command not found");
                Err(CommandHandleError::CommandNotFound { key, during })
            }
        }
    }

    fn gate(
        &self,
        user: &UserId,
        required: PrivilegeLevel,
        key: &str,
        action: &'static str,
    ) -> Result<(), CommandHandleError> {
        if self.authority.meets(user, required) {
            return Ok(());
        }

        warn!(
            user = %user,
            level = self.authority.level_of(user),
            required,
            key,
            "Rejected dispatch: lacking privileges"
        );
        Err(CommandHandleError::LackingPrivileges {
            user: user.clone(),
            required,
            key: key.to_string(),
            action,
        })
    }
}

/// Event path joined as-is, for error messages when no valid key exists.
fn raw_path<P: CommandPath + ?Sized>(event: &P) -> String {
    let mut path = event.command_name().to_string();
    for segment in [event.subcommand_group(), event.subcommand()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
    {
        path.push(KEY_SEPARATOR);
        path.push_str(segment);
    }
    path
}

#[async_trait]
impl CommandDispatchApi for CommandRegistry {
    async fn handle_autocomplete(
        &self,
        event: &AutocompleteEvent,
    ) -> Result<(), CommandHandleError> {
        CommandRegistry::handle_autocomplete(self, event).await
    }

    async fn handle_chat_input(&self, event: &ChatInputEvent) -> Result<(), CommandHandleError> {
        CommandRegistry::handle_chat_input(self, event).await
    }

    async fn handle_context_menu(
        &self,
        event: &ContextMenuEvent,
    ) -> Result<(), CommandHandleError> {
        CommandRegistry::handle_context_menu(self, event).await
    }

    async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, CommandHandleError> {
        CommandRegistry::handle_interaction(self, interaction).await
    }
}
