//! Template registration inputs

use shared_types::ComponentKind;
use std::marker::PhantomData;

use crate::ports::{ComponentHandler, ModalHandler};

/// A button or select-menu template whose instances carry `D`.
pub struct RegisterComponent<D, H> {
    /// Generated when absent.
    pub identifier: Option<String>,
    pub kind: ComponentKind,
    pub handler: H,
    _payload: PhantomData<fn() -> D>,
}

impl<D, H> RegisterComponent<D, H>
where
    D: Send + Sync + 'static,
    H: ComponentHandler<D>,
{
    pub fn new(kind: ComponentKind, handler: H) -> Self {
        Self {
            identifier: None,
            kind,
            handler,
            _payload: PhantomData,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// A modal template whose instances carry `D`.
pub struct RegisterModal<D, H> {
    /// Generated when absent.
    pub identifier: Option<String>,
    pub handler: H,
    _payload: PhantomData<fn() -> D>,
}

impl<D, H> RegisterModal<D, H>
where
    D: Send + Sync + 'static,
    H: ModalHandler<D>,
{
    pub fn new(handler: H) -> Self {
        Self {
            identifier: None,
            handler,
            _payload: PhantomData,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}
