//! Ports Layer
//!
//! - Driving port (inbound): `ComponentDispatchApi`
//! - Driven ports (outbound): `ComponentHandler<D>` and `ModalHandler<D>`,
//!   implemented by developer code

pub mod inbound;
pub mod outbound;

pub use inbound::ComponentDispatchApi;
pub use outbound::{ComponentContext, ComponentHandler, ModalContext, ModalHandler};
