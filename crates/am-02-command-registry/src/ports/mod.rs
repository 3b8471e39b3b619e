//! Ports Layer
//!
//! - Driving port (inbound): `CommandDispatchApi`, used by the facade and transports
//! - Driven ports (outbound): handler traits implemented by developer code

pub mod inbound;
pub mod outbound;

pub use inbound::CommandDispatchApi;
pub use outbound::{AutocompleteHandler, CommandHandler, ContextMenuHandler};
