//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::{ComponentEvent, DispatchOutcome, Interaction, ModalSubmitEvent};

use crate::error::ComponentHandleError;

/// Component and modal dispatch API (Driving Port)
///
/// `Ignored` means the custom id was not minted by this registry, or was the
/// ignore sentinel.
#[async_trait]
pub trait ComponentDispatchApi: Send + Sync {
    async fn handle_component(
        &self,
        event: &ComponentEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError>;

    async fn handle_modal(
        &self,
        event: &ModalSubmitEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError>;

    /// Route by interaction kind. Command kinds are ignored.
    async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, ComponentHandleError>;
}
