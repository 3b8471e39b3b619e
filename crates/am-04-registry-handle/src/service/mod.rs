//! Service Layer

pub mod registry_handle;

pub use registry_handle::RegistryHandle;
