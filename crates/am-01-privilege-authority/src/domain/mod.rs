//! Domain Layer - Pure privilege lookup
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod authority;
pub mod config;

pub use authority::PrivilegeAuthority;
pub use config::PrivilegeConfig;
