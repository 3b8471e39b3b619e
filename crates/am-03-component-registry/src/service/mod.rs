//! Service Layer
//!
//! Template tables and dispatch orchestration.

pub mod component_registry;
mod erased;

pub use component_registry::ComponentRegistry;
