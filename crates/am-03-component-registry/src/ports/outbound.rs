//! Outbound Ports (Driven Ports)
//!
//! Handlers receive an owned context: the event, the payload the custom id
//! was minted with, and a dropper that retires this instance.
//!
//! ```ignore
//! let vote = registry.register_component(RegisterComponent::new(
//!     ComponentKind::Button,
//!     |ctx: ComponentContext<Poll>| async move {
//!         ctx.data.record(&ctx.event.user);
//!         ctx.dropper.drop_instance();
//!         anyhow::Ok(())
//!     },
//! ))?;
//! ```

use async_trait::async_trait;
use shared_types::{ComponentEvent, ModalSubmitEvent};
use std::future::Future;
use std::sync::Arc;

use crate::domain::InstanceDropper;

/// Context for a button or select-menu handler.
#[derive(Debug)]
pub struct ComponentContext<D> {
    pub event: ComponentEvent,
    pub data: Arc<D>,
    pub dropper: InstanceDropper,
}

/// Context for a modal-submit handler.
#[derive(Debug)]
pub struct ModalContext<D> {
    pub event: ModalSubmitEvent,
    pub data: Arc<D>,
    pub dropper: InstanceDropper,
}

/// Handles interactions with a component template whose instances carry `D`.
#[async_trait]
pub trait ComponentHandler<D: Send + Sync + 'static>: Send + Sync {
    async fn handle(&self, ctx: ComponentContext<D>) -> anyhow::Result<()>;
}

/// Handles submissions of a modal template whose instances carry `D`.
#[async_trait]
pub trait ModalHandler<D: Send + Sync + 'static>: Send + Sync {
    async fn handle(&self, ctx: ModalContext<D>) -> anyhow::Result<()>;
}

#[async_trait]
impl<D, F, Fut> ComponentHandler<D> for F
where
    D: Send + Sync + 'static,
    F: Fn(ComponentContext<D>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, ctx: ComponentContext<D>) -> anyhow::Result<()> {
        (self)(ctx).await
    }
}

#[async_trait]
impl<D, F, Fut> ModalHandler<D> for F
where
    D: Send + Sync + 'static,
    F: Fn(ModalContext<D>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, ctx: ModalContext<D>) -> anyhow::Result<()> {
        (self)(ctx).await
    }
}
