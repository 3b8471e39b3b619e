//! Type-erased template handlers
//!
//! Templates of different payload types share one table per kind. The
//! adapter downcasts the stored payload back to the template's `D` before
//! calling the typed handler.

use async_trait::async_trait;
use shared_types::{ComponentEvent, ComponentKind, ModalSubmitEvent};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::{InstanceDropper, Payload};
use crate::ports::{ComponentContext, ComponentHandler, ModalContext, ModalHandler};

pub(crate) enum InvokeError {
    /// The stored payload is not the template's payload type.
    PayloadMismatch,
    /// The handler returned an error.
    Failed(anyhow::Error),
}

#[async_trait]
pub(crate) trait ErasedHandler<E: Send + Sync>: Send + Sync {
    async fn invoke(
        &self,
        event: &E,
        payload: Payload,
        dropper: InstanceDropper,
    ) -> Result<(), InvokeError>;
}

/// A registered template.
pub(crate) struct Template<E: Send + Sync + 'static> {
    /// Declared component type; `None` for modals.
    pub component_kind: Option<ComponentKind>,
    pub handler: Arc<dyn ErasedHandler<E>>,
}

pub(crate) struct ComponentAdapter<D, H> {
    handler: H,
    _payload: PhantomData<fn() -> D>,
}

impl<D, H> ComponentAdapter<D, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<D, H> ErasedHandler<ComponentEvent> for ComponentAdapter<D, H>
where
    D: Send + Sync + 'static,
    H: ComponentHandler<D>,
{
    async fn invoke(
        &self,
        event: &ComponentEvent,
        payload: Payload,
        dropper: InstanceDropper,
    ) -> Result<(), InvokeError> {
        let data = payload
            .downcast::<D>()
            .map_err(|_| InvokeError::PayloadMismatch)?;
        let ctx = ComponentContext {
            event: event.clone(),
            data,
            dropper,
        };
        self.handler.handle(ctx).await.map_err(InvokeError::Failed)
    }
}

pub(crate) struct ModalAdapter<D, H> {
    handler: H,
    _payload: PhantomData<fn() -> D>,
}

impl<D, H> ModalAdapter<D, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _payload: PhantomData,
        }
    }
}

#[async_trait]
impl<D, H> ErasedHandler<ModalSubmitEvent> for ModalAdapter<D, H>
where
    D: Send + Sync + 'static,
    H: ModalHandler<D>,
{
    async fn invoke(
        &self,
        event: &ModalSubmitEvent,
        payload: Payload,
        dropper: InstanceDropper,
    ) -> Result<(), InvokeError> {
        let data = payload
            .downcast::<D>()
            .map_err(|_| InvokeError::PayloadMismatch)?;
        let ctx = ModalContext {
            event: event.clone(),
            data,
            dropper,
        };
        self.handler.handle(ctx).await.map_err(InvokeError::Failed)
    }
}
