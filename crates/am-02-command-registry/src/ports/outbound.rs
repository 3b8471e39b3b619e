//! Outbound Ports (Driven Ports)
//!
//! Handler traits implemented by developer code. Each has a blanket
//! implementation for async closures taking the event by value, so most
//! registrations never name a handler type:
//!
//! ```ignore
//! let ping = RegisterCommand::new(json!({ "name": "ping" }), |event: ChatInputEvent| async move {
//!     tracing::info!(user = %event.user, "pong");
//!     anyhow::Ok(())
//! });
//! ```

use async_trait::async_trait;
use shared_types::{AutocompleteEvent, ChatInputEvent, ContextMenuEvent};
use std::future::Future;

/// Executes a slash command or subcommand.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, event: &ChatInputEvent) -> anyhow::Result<()>;
}

/// Answers autocomplete requests for a command's options.
#[async_trait]
pub trait AutocompleteHandler: Send + Sync {
    async fn autocomplete(&self, event: &AutocompleteEvent) -> anyhow::Result<()>;
}

/// Executes a user or message context menu.
#[async_trait]
pub trait ContextMenuHandler: Send + Sync {
    async fn execute(&self, event: &ContextMenuEvent) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> CommandHandler for F
where
    F: Fn(ChatInputEvent) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, event: &ChatInputEvent) -> anyhow::Result<()> {
        (self)(event.clone()).await
    }
}

#[async_trait]
impl<F, Fut> AutocompleteHandler for F
where
    F: Fn(AutocompleteEvent) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn autocomplete(&self, event: &AutocompleteEvent) -> anyhow::Result<()> {
        (self)(event.clone()).await
    }
}

#[async_trait]
impl<F, Fut> ContextMenuHandler for F
where
    F: Fn(ContextMenuEvent) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, event: &ContextMenuEvent) -> anyhow::Result<()> {
        (self)(event.clone()).await
    }
}
