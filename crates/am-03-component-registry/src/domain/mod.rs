//! Domain Layer
//!
//! Custom id codec, template identity, and the ephemeral instance store.

pub mod config;
pub mod custom_id;
pub mod instance_store;
pub mod minter;
pub mod registration;
pub mod template;

pub use config::{ComponentConfig, DEFAULT_INSTANCE_TTL};
pub use custom_id::{
    classify, decode, encode, generate_identifier, CustomIdField, CustomIdParts, TokenClass,
    CUSTOM_ID_PREFIX, CUSTOM_ID_SEPARATOR, GENERATED_ID_LEN, IGNORE_SENTINEL, MAX_CUSTOM_ID_LEN,
    THROW_SENTINEL,
};
pub use instance_store::{
    InstanceDropper, InstanceSnapshot, InstanceStore, Payload, StoreStats, MAX_INSTANCE_TTL,
};
pub use minter::{CustomIdMinter, MintOptions};
pub use registration::{RegisterComponent, RegisterModal};
pub use template::{TemplateKind, TemplateRef};
