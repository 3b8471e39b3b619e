//! Registry Handle
//!
//! One explicitly constructed context owning the privilege authority and both
//! registries. Register everything through `&mut self` at startup, then share
//! the handle behind an `Arc` for dispatch.

use am_01_privilege_authority::PrivilegeAuthority;
use am_02_command_registry::{
    CommandKey, CommandRegistry, PublishedCommandBody, RegisterCommand, RegisterContextMenu,
    RegisterGroupedCommand, RegisterSubcommand, RegistrationError as CommandRegistrationError,
    SubcommandReference,
};
use am_03_component_registry::{
    ComponentHandler, ComponentRegistry, CustomIdMinter, InstanceStore, ModalHandler,
    RegisterComponent, RegisterModal, RegistrationError as ComponentRegistrationError, StoreStats,
};
use serde_json::Value;
use shared_types::{DispatchOutcome, Interaction};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{select_bodies, CommandRoute, GuildCommandsTarget, RegistryConfig};
use crate::error::{ConfigError, PublishError, RegistryError};
use crate::ports::CommandPublisher;

/// Registration, dispatch and publication entry point.
pub struct RegistryHandle {
    authority: Arc<PrivilegeAuthority>,
    commands: CommandRegistry,
    components: ComponentRegistry,
}

impl RegistryHandle {
    pub fn new(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let authority = Arc::new(PrivilegeAuthority::from_config(&config.privilege)?);
        let commands = CommandRegistry::new(authority.clone());
        let components = ComponentRegistry::new(config.component_config())?;

        info!(
            version = %config.version,
            default_ttl_secs = config.default_ttl_secs,
            default_level = authority.default_level(),
            privileged_users = authority.privileged_users(),
            "Registry handle created"
        );

        Ok(Self {
            authority,
            commands,
            components,
        })
    }

    pub fn authority(&self) -> &Arc<PrivilegeAuthority> {
        &self.authority
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn version(&self) -> &str {
        self.components.version()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub fn register_command(
        &mut self,
        command: RegisterCommand,
    ) -> Result<CommandKey, CommandRegistrationError> {
        self.commands.register_command(command)
    }

    pub fn register_grouped_command(
        &mut self,
        command: RegisterGroupedCommand,
    ) -> Result<Vec<CommandKey>, CommandRegistrationError> {
        self.commands.register_grouped_command(command)
    }

    pub fn register_context_menu(
        &mut self,
        menu: RegisterContextMenu,
    ) -> Result<String, CommandRegistrationError> {
        self.commands.register_context_menu(menu)
    }

    pub fn generate_subcommand(
        &self,
        subcommand: RegisterSubcommand,
    ) -> Result<SubcommandReference, CommandRegistrationError> {
        self.commands.generate_subcommand(subcommand)
    }

    pub fn register_component<D, H>(
        &mut self,
        component: RegisterComponent<D, H>,
    ) -> Result<CustomIdMinter<D>, ComponentRegistrationError>
    where
        D: Send + Sync + 'static,
        H: ComponentHandler<D> + 'static,
    {
        self.components.register_component(component)
    }

    pub fn register_modal<D, H>(
        &mut self,
        modal: RegisterModal<D, H>,
    ) -> Result<CustomIdMinter<D>, ComponentRegistrationError>
    where
        D: Send + Sync + 'static,
        H: ModalHandler<D> + 'static,
    {
        self.components.register_modal(modal)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route an interaction to the registry that owns its kind.
    ///
    /// Errors are returned unchanged; presenting them is the transport's job.
    pub async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, RegistryError> {
        let outcome = match interaction {
            Interaction::Autocomplete(_)
            | Interaction::ChatInput(_)
            | Interaction::ContextMenu(_) => self.commands.handle_interaction(interaction).await?,
            Interaction::Component(_) | Interaction::ModalSubmit(_) => {
                self.components.handle_interaction(interaction).await?
            }
            Interaction::Unknown => {
                debug!("Ignoring interaction of unknown kind");
                DispatchOutcome::Ignored
            }
        };
        Ok(outcome)
    }

    // =========================================================================
    // Instances
    // =========================================================================

    pub fn instance_store(&self) -> &Arc<InstanceStore> {
        self.components.store()
    }

    /// Sweep expired component instances now.
    pub fn purge_expired_instances(&self) -> usize {
        self.components.store().purge_expired()
    }

    pub fn instance_stats(&self) -> StoreStats {
        self.components.store().stats()
    }

    // =========================================================================
    // Publication
    // =========================================================================

    /// Every published body with its admin flag, in registration order.
    pub fn published(&self) -> &[PublishedCommandBody] {
        self.commands.published()
    }

    /// Bodies of commands available at the default level.
    pub fn command_post_body(&self) -> Vec<Value> {
        select_bodies(self.commands.published(), false)
    }

    /// Bodies of every registered command, admin ones included.
    pub fn all_command_post_body(&self) -> Vec<Value> {
        select_bodies(self.commands.published(), true)
    }

    /// Publish to one guild, optionally including admin commands.
    pub async fn load_guild_commands<P>(
        &self,
        publisher: &P,
        target: GuildCommandsTarget,
    ) -> Result<Vec<Value>, PublishError>
    where
        P: CommandPublisher + ?Sized,
    {
        let bodies = select_bodies(self.commands.published(), target.include_admin);
        self.publish(publisher, target.route(), bodies).await
    }

    /// Publish globally. Admin commands are never published globally.
    pub async fn load_global_commands<P>(
        &self,
        publisher: &P,
        client_id: impl Into<String>,
    ) -> Result<Vec<Value>, PublishError>
    where
        P: CommandPublisher + ?Sized,
    {
        let route = CommandRoute::Global {
            client_id: client_id.into(),
        };
        self.publish(publisher, route, self.command_post_body()).await
    }

    async fn publish<P>(
        &self,
        publisher: &P,
        route: CommandRoute,
        bodies: Vec<Value>,
    ) -> Result<Vec<Value>, PublishError>
    where
        P: CommandPublisher + ?Sized,
    {
        let created = publisher.post_commands(&route, &bodies).await?;
        info!(
            route = %route,
            posted = bodies.len(),
            created = created.len(),
            "Published commands"
        );
        Ok(created)
    }
}
