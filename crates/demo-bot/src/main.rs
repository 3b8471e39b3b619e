//! # Amber Demo Bot
//!
//! Plays the transport role for the registry:
//!
//! 1. Load configuration (`AMBER_CONFIG` file, then env overrides)
//! 2. Register the demo commands and button
//! 3. Print the full command post body; publish it when `AMBER_CLIENT_ID` is set
//! 4. Dispatch newline-delimited JSON interactions from stdin until EOF
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

mod handlers;
mod publisher;

use std::sync::Arc;

use am_03_component_registry::MintOptions;
use am_04_registry_handle::{GuildCommandsTarget, RegistryConfig, RegistryHandle};
use anyhow::{Context, Result};
use shared_types::Interaction;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::handlers::Confirmation;
use crate::publisher::StdoutPublisher;

fn load_config() -> Result<RegistryConfig> {
    let mut config = match std::env::var("AMBER_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            RegistryConfig::from_json(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        Err(_) => RegistryConfig::default(),
    };

    if let Ok(version) = std::env::var("AMBER_VERSION") {
        config.version = version;
    }
    if let Ok(ttl) = std::env::var("AMBER_DEFAULT_TTL_SECS") {
        match ttl.parse() {
            Ok(secs) => config.default_ttl_secs = secs,
            Err(_) => warn!(value = %ttl, "AMBER_DEFAULT_TTL_SECS must be a whole number of seconds"),
        }
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;
    let mut registry = RegistryHandle::new(config).context("building registry")?;
    let confirm = handlers::register(&mut registry)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&registry.all_command_post_body())?
    );

    if let Ok(client_id) = std::env::var("AMBER_CLIENT_ID") {
        let publisher = StdoutPublisher::new();
        let created = match std::env::var("AMBER_GUILD_ID") {
            Ok(guild_id) => {
                let target = GuildCommandsTarget::new(client_id, guild_id).with_admin();
                registry.load_guild_commands(&publisher, target).await?
            }
            Err(_) => registry.load_global_commands(&publisher, client_id).await?,
        };
        info!(created = created.len(), "Commands published");
    }

    let token = confirm.mint(
        Confirmation {
            action: "demo".to_string(),
        },
        MintOptions::default(),
    )?;
    info!(custom_id = %token, "Minted demo confirm button");

    let registry = Arc::new(registry);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let interaction: Interaction = match serde_json::from_str(line) {
            Ok(interaction) => interaction,
            Err(e) => {
                warn!(error = %e, "Skipping malformed interaction");
                continue;
            }
        };

        let kind = interaction.kind_name();
        match registry.handle_interaction(&interaction).await {
            Ok(outcome) => info!(kind, ?outcome, "Dispatched"),
            Err(err) => warn!(kind, code = %err.kind(), error = %err, "Dispatch failed"),
        }
    }

    debug!(stats = ?registry.instance_stats(), "Input closed");
    info!("Shutting down");
    Ok(())
}
