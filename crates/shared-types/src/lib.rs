//! # Shared Types Crate
//!
//! Identities, inbound interaction payloads and the dispatch error taxonomy
//! used by every Amber registry crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary is
//!   defined here.
//! - **Transport Agnostic**: payloads are plain serde structs; the transport
//!   layer decodes platform events into them and nothing else.
//! - **Stable Error Kinds**: dispatch errors from any registry report one of
//!   the `HandleErrorKind` codes.

pub mod entities;
pub mod errors;
pub mod interactions;

pub use entities::*;
pub use errors::*;
pub use interactions::*;
