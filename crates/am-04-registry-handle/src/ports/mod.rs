//! Ports Layer
//!
//! - Driven port (outbound): `CommandPublisher`, the platform's command
//!   registration endpoint

pub mod outbound;

pub use outbound::CommandPublisher;
