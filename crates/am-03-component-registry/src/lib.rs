//! # AM-03 Component Registry
//!
//! Routes button, select-menu and modal interactions back to the template
//! that minted their custom id, with the per-instance payload attached.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): synchronous, no I/O
//!   - `custom_id`: `prefix.version.template.instance` codec and sentinels
//!   - `InstanceStore`: DashMap-backed payload store with per-entry TTL;
//!     the only domain type touching tokio, spawning one eviction timer per
//!     entry on the ambient runtime
//!   - `CustomIdMinter`: stores a payload and encodes its custom id
//!
//! - **Ports Layer** (`ports/`)
//!   - `ComponentDispatchApi`: driving port
//!   - `ComponentHandler<D>`, `ModalHandler<D>`: driven ports
//!
//! - **Service Layer** (`service/`)
//!   - `ComponentRegistry`: template tables and dispatch
//!
//! ## Invariants
//!
//! - **Field Safety**: no custom id field contains the separator; this is
//!   enforced when templates are registered and when ids are minted.
//! - **Version Gate**: a custom id minted under another version is rejected
//!   before any lookup, whether or not its instance still exists.
//! - **Single Removal**: an instance is removed at most once; the eviction
//!   timer of a dropped or replaced instance is cancelled.
//! - **Kind Separation**: components and modals live in separate tables and
//!   an instance only resolves through the table it was minted for.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{
    classify, decode, encode, generate_identifier, ComponentConfig, CustomIdField, CustomIdMinter,
    CustomIdParts, InstanceDropper, InstanceSnapshot, InstanceStore, MintOptions,
    RegisterComponent, RegisterModal, StoreStats, TemplateKind, TemplateRef, TokenClass,
    CUSTOM_ID_PREFIX, CUSTOM_ID_SEPARATOR, DEFAULT_INSTANCE_TTL, GENERATED_ID_LEN,
    IGNORE_SENTINEL, MAX_CUSTOM_ID_LEN, MAX_INSTANCE_TTL, THROW_SENTINEL,
};
pub use error::{ComponentHandleError, FieldError, HandlerError, MintError, RegistrationError};
pub use ports::{
    ComponentContext, ComponentDispatchApi, ComponentHandler, ModalContext, ModalHandler,
};
pub use service::ComponentRegistry;
