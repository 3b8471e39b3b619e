//! Service Layer
//!
//! Registration tables and dispatch orchestration.

pub mod command_registry;

pub use command_registry::CommandRegistry;
