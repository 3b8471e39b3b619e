//! # AM-02 Command Registry
//!
//! Routes slash-command, autocomplete and context-menu interactions to
//! developer-registered handlers behind a privilege gate.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): pure logic, no I/O
//!   - `CommandKey`: hierarchical `root[.group][.sub]` resolution key
//!   - `CommandDefinition` / `ContextMenuDefinition`: stored handlers
//!   - `PublishedCommandBody`: JSON body plus the derived admin flag
//!
//! - **Ports Layer** (`ports/`):
//!   - `CommandDispatchApi`: driving port (inbound dispatch)
//!   - `CommandHandler`, `AutocompleteHandler`, `ContextMenuHandler`:
//!     driven ports implemented by developer code
//!
//! - **Service Layer** (`service/`):
//!   - `CommandRegistry`: registration tables and dispatch
//!
//! ## Dispatch Sequence
//!
//! 1. Derive the key from the event; resolve the definition
//! 2. Autocomplete only: require an autocomplete handler
//! 3. Privilege gate via the Privilege Authority
//! 4. Invoke; handler errors are wrapped with the cause chained
//!
//! ## Invariants
//!
//! - **Key Mirror**: the key built from an event is byte-identical to the key
//!   built at registration for the same path.
//! - **Admin Bubbling**: a grouped command's published body is admin if any
//!   contained subcommand's effective level exceeds the default.
//! - **Unique Keys**: registering a key twice is an error, never an overwrite.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{
    CommandDefinition, CommandKey, ContextMenuDefinition, PublishedCommandBody, RegisterCommand,
    RegisterContextMenu, RegisterGroupedCommand, RegisterSubcommand, SubcommandGroup,
    SubcommandReference, KEY_SEPARATOR,
};
pub use error::{CommandHandleError, HandlerError, KeyError, RegistrationError};
pub use ports::{AutocompleteHandler, CommandDispatchApi, CommandHandler, ContextMenuHandler};
pub use service::CommandRegistry;
