//! Domain Layer
//!
//! Pure registration types and key logic. No I/O, no async.

pub mod definition;
pub mod key;

pub use definition::{
    command_name, CommandDefinition, ContextMenuDefinition, PublishedCommandBody,
    RegisterCommand, RegisterContextMenu, RegisterGroupedCommand, RegisterSubcommand,
    SubcommandGroup, SubcommandReference,
};
pub use key::{CommandKey, KEY_SEPARATOR};
