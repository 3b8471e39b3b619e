//! Domain Layer

pub mod config;
pub mod publication;

pub use config::{RegistryConfig, DEFAULT_TTL_SECS};
pub use publication::{select_bodies, CommandRoute, GuildCommandsTarget};
