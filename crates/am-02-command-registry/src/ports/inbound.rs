//! Inbound Ports (Driving Ports)
//!
//! The dispatch API a transport drives with inbound command interactions.

use async_trait::async_trait;
use shared_types::{
    AutocompleteEvent, ChatInputEvent, ContextMenuEvent, DispatchOutcome, Interaction,
};

use crate::error::CommandHandleError;

/// Command dispatch API (Driving Port)
///
/// Every method fails on the first unmet precondition; nothing is retried.
#[async_trait]
pub trait CommandDispatchApi: Send + Sync {
    /// Route an autocomplete request to the command's autocomplete handler.
    async fn handle_autocomplete(&self, event: &AutocompleteEvent)
        -> Result<(), CommandHandleError>;

    /// Route a slash-command invocation.
    async fn handle_chat_input(&self, event: &ChatInputEvent) -> Result<(), CommandHandleError>;

    /// Route a context-menu activation.
    async fn handle_context_menu(&self, event: &ContextMenuEvent)
        -> Result<(), CommandHandleError>;

    /// Route by interaction kind. Kinds this registry does not own are ignored.
    async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, CommandHandleError>;
}
