//! # AM-04 Registry Handle
//!
//! The single context a bot constructs at startup. It owns the Privilege
//! Authority, the Command Registry and the Component Registry, routes every
//! inbound interaction to the right one, and decides which command bodies
//! are published where.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = RegistryHandle::new(RegistryConfig::from_json(&raw)?)?;
//! registry.register_command(RegisterCommand::new(json!({ "name": "ping" }), ping))?;
//! registry.load_guild_commands(&publisher, GuildCommandsTarget::new(app, guild)).await?;
//!
//! let registry = Arc::new(registry);
//! match registry.handle_interaction(&interaction).await {
//!     Ok(outcome) => debug!(?outcome, "dispatched"),
//!     Err(err) => warn!(kind = %err.kind(), error = %err, "dispatch failed"),
//! }
//! ```
//!
//! ## Invariants
//!
//! - Global publication never includes admin commands.
//! - Dispatch errors are returned unchanged, with their kind and cause.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{select_bodies, CommandRoute, GuildCommandsTarget, RegistryConfig, DEFAULT_TTL_SECS};
pub use error::{ConfigError, PublishError, RegistryError};
pub use ports::CommandPublisher;
pub use service::RegistryHandle;
