//! Custom id minting
//!
//! A `CustomIdMinter` is bound to one template. Each `mint` stores a payload
//! under a fresh instance id and returns the token to embed in the outbound
//! component.

use shared_types::UserId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::domain::custom_id::{encode, CustomIdField, CUSTOM_ID_PREFIX, MAX_CUSTOM_ID_LEN};
use crate::domain::instance_store::InstanceStore;
use crate::domain::template::TemplateRef;
use crate::error::MintError;

/// Per-mint options. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintOptions {
    /// Only this user may trigger the instance.
    pub owner: Option<UserId>,
    /// Overrides the registry's default TTL.
    pub ttl: Option<Duration>,
    /// Explicit instance id; generated when absent.
    pub instance_id: Option<String>,
}

impl MintOptions {
    pub fn owned_by(mut self, user: impl Into<UserId>) -> Self {
        self.owner = Some(user.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }
}

/// Mints custom ids for one template.
pub struct CustomIdMinter<D> {
    template: TemplateRef,
    template_id: CustomIdField,
    version: CustomIdField,
    default_ttl: Duration,
    store: Arc<InstanceStore>,
    _payload: PhantomData<fn(D)>,
}

impl<D> CustomIdMinter<D>
where
    D: Send + Sync + 'static,
{
    pub(crate) fn new(
        template: TemplateRef,
        template_id: CustomIdField,
        version: CustomIdField,
        default_ttl: Duration,
        store: Arc<InstanceStore>,
    ) -> Self {
        Self {
            template,
            template_id,
            version,
            default_ttl,
            store,
            _payload: PhantomData,
        }
    }

    /// Store `data` as a new instance and return its custom id.
    pub fn mint(&self, data: D, options: MintOptions) -> Result<String, MintError> {
        let MintOptions {
            owner,
            ttl,
            instance_id,
        } = options;

        let instance_id = match instance_id {
            Some(id) => CustomIdField::non_empty(id)?,
            None => CustomIdField::generate(),
        };

        let token = encode(CUSTOM_ID_PREFIX, &self.version, &self.template_id, &instance_id);
        let len = token.chars().count();
        if len > MAX_CUSTOM_ID_LEN {
            return Err(MintError::TooLong {
                len,
                max: MAX_CUSTOM_ID_LEN,
            });
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.store.put(
            instance_id.as_str(),
            self.template.clone(),
            Arc::new(data),
            owner,
            ttl,
        );

        debug!(
            template = %self.template_id,
            kind = %self.template.kind,
            instance_id = %instance_id,
            "Minted custom id"
        );
        Ok(token)
    }

    /// Template identifier this minter is bound to.
    pub fn identifier(&self) -> &str {
        self.template_id.as_str()
    }

    pub fn template(&self) -> &TemplateRef {
        &self.template
    }
}

impl<D> Clone for CustomIdMinter<D> {
    fn clone(&self) -> Self {
        Self {
            template: self.template.clone(),
            template_id: self.template_id.clone(),
            version: self.version.clone(),
            default_ttl: self.default_ttl,
            store: self.store.clone(),
            _payload: PhantomData,
        }
    }
}

impl<D> fmt::Debug for CustomIdMinter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomIdMinter")
            .field("template", &self.template)
            .field("version", &self.version)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
