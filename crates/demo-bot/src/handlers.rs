//! Demo handlers

use am_02_command_registry::{
    RegisterCommand, RegisterGroupedCommand, RegisterSubcommand, SubcommandGroup,
};
use am_03_component_registry::{ComponentContext, CustomIdMinter, RegisterComponent};
use am_04_registry_handle::RegistryHandle;
use anyhow::Result;
use serde_json::json;
use shared_types::{ChatInputEvent, ComponentKind, CommandOptionType};
use tracing::info;

/// Payload carried by each minted confirm button.
#[derive(Debug)]
pub struct Confirmation {
    pub action: String,
}

async fn ping(event: ChatInputEvent) -> Result<()> {
    info!(user = %event.user, "pong");
    Ok(())
}

async fn root_group_sub(event: ChatInputEvent) -> Result<()> {
    info!(user = %event.user, options = %event.options, "root group sub executed");
    Ok(())
}

async fn confirm(ctx: ComponentContext<Confirmation>) -> Result<()> {
    info!(
        user = %ctx.event.user,
        action = %ctx.data.action,
        instance_id = ctx.dropper.instance_id(),
        "Confirmed"
    );
    // One-shot button.
    ctx.dropper.drop_instance();
    Ok(())
}

/// Register the demo commands and the confirm button.
pub fn register(registry: &mut RegistryHandle) -> Result<CustomIdMinter<Confirmation>> {
    registry.register_command(RegisterCommand::new(
        json!({ "name": "ping", "description": "Replies with pong" }),
        ping,
    ))?;

    let sub = registry.generate_subcommand(RegisterSubcommand::new("sub", root_group_sub))?;
    registry.register_grouped_command(
        RegisterGroupedCommand::new(json!({
            "name": "root",
            "description": "Privileged maintenance commands",
            "options": [{
                "type": CommandOptionType::SubcommandGroup.as_u8(),
                "name": "group",
                "description": "Group",
                "options": [{
                    "type": CommandOptionType::Subcommand.as_u8(),
                    "name": "sub",
                    "description": "Subcommand"
                }]
            }]
        }))
        .with_privilege(5)
        .with_group(SubcommandGroup::new("group").with_subcommand(sub)),
    )?;

    let minter = registry.register_component(
        RegisterComponent::new(ComponentKind::Button, confirm).with_identifier("confirm"),
    )?;
    Ok(minter)
}
