//! Component Registry Service
//!
//! Template tables for components and modals, plus the shared instance
//! store. Dispatch runs the same gate sequence for both kinds:
//!
//! ignore sentinel → cached guild → throw sentinel / foreign token →
//! version → template → instance → owner → handler

use async_trait::async_trait;
use shared_types::{
    ComponentEvent, CustomIdSource, DispatchOutcome, Interaction, InteractionMeta,
    ModalSubmitEvent,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{
    classify, ComponentConfig, CustomIdField, CustomIdMinter, InstanceDropper, InstanceStore,
    RegisterComponent, RegisterModal, TemplateKind, TemplateRef, TokenClass,
};
use crate::error::{ComponentHandleError, FieldError, RegistrationError};
use crate::ports::{ComponentDispatchApi, ComponentHandler, ModalHandler};
use crate::service::erased::{ComponentAdapter, InvokeError, ModalAdapter, Template};

/// Versioned component and modal routing.
pub struct ComponentRegistry {
    version: CustomIdField,
    default_ttl: Duration,
    store: Arc<InstanceStore>,
    components: HashMap<String, Template<ComponentEvent>>,
    modals: HashMap<String, Template<ModalSubmitEvent>>,
}

impl ComponentRegistry {
    /// Create a registry with its own instance store.
    pub fn new(config: ComponentConfig) -> Result<Self, FieldError> {
        Self::with_store(config, Arc::new(InstanceStore::new()))
    }

    /// Create a registry over an existing instance store.
    pub fn with_store(
        config: ComponentConfig,
        store: Arc<InstanceStore>,
    ) -> Result<Self, FieldError> {
        let version = CustomIdField::new(config.version)?;
        Ok(Self {
            version,
            default_ttl: config.default_ttl,
            store,
            components: HashMap::new(),
            modals: HashMap::new(),
        })
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn store(&self) -> &Arc<InstanceStore> {
        &self.store
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn modal_count(&self) -> usize {
        self.modals.len()
    }

    pub fn has_component(&self, identifier: &str) -> bool {
        self.components.contains_key(identifier)
    }

    pub fn has_modal(&self, identifier: &str) -> bool {
        self.modals.contains_key(identifier)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a button or select-menu template.
    pub fn register_component<D, H>(
        &mut self,
        component: RegisterComponent<D, H>,
    ) -> Result<CustomIdMinter<D>, RegistrationError>
    where
        D: Send + Sync + 'static,
        H: ComponentHandler<D> + 'static,
    {
        let RegisterComponent {
            identifier,
            kind,
            handler,
            ..
        } = component;

        let identifier = template_identifier(identifier, |id| self.components.contains_key(id))?;
        if self.components.contains_key(identifier.as_str()) {
            return Err(RegistrationError::duplicate(
                TemplateKind::Component,
                identifier.as_str(),
            ));
        }

        self.components.insert(
            identifier.to_string(),
            Template {
                component_kind: Some(kind),
                handler: Arc::new(ComponentAdapter::new(handler)),
            },
        );

        debug!(identifier = %identifier, kind = ?kind, "Registered component");
        Ok(self.minter(TemplateKind::Component, identifier))
    }

    /// Register a modal template.
    pub fn register_modal<D, H>(
        &mut self,
        modal: RegisterModal<D, H>,
    ) -> Result<CustomIdMinter<D>, RegistrationError>
    where
        D: Send + Sync + 'static,
        H: ModalHandler<D> + 'static,
    {
        let RegisterModal {
            identifier,
            handler,
            ..
        } = modal;

        let identifier = template_identifier(identifier, |id| self.modals.contains_key(id))?;
        if self.modals.contains_key(identifier.as_str()) {
            return Err(RegistrationError::duplicate(
                TemplateKind::Modal,
                identifier.as_str(),
            ));
        }

        self.modals.insert(
            identifier.to_string(),
            Template {
                component_kind: None,
                handler: Arc::new(ModalAdapter::new(handler)),
            },
        );

        debug!(identifier = %identifier, "Registered modal");
        Ok(self.minter(TemplateKind::Modal, identifier))
    }

    fn minter<D: Send + Sync + 'static>(
        &self,
        kind: TemplateKind,
        identifier: CustomIdField,
    ) -> CustomIdMinter<D> {
        CustomIdMinter::new(
            TemplateRef::new(kind, identifier.as_str()),
            identifier,
            self.version.clone(),
            self.default_ttl,
            self.store.clone(),
        )
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub async fn handle_component(
        &self,
        event: &ComponentEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        self.dispatch(event, TemplateKind::Component, &self.components)
            .await
    }

    pub async fn handle_modal(
        &self,
        event: &ModalSubmitEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        self.dispatch(event, TemplateKind::Modal, &self.modals).await
    }

    /// Route component and modal interactions; other kinds are ignored.
    pub async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        match interaction {
            Interaction::Component(event) => self.handle_component(event).await,
            Interaction::ModalSubmit(event) => self.handle_modal(event).await,
            other => {
                debug!(kind = other.kind_name(), "Ignoring non-component interaction");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    async fn dispatch<E>(
        &self,
        event: &E,
        kind: TemplateKind,
        table: &HashMap<String, Template<E>>,
    ) -> Result<DispatchOutcome, ComponentHandleError>
    where
        E: CustomIdSource + Send + Sync + 'static,
    {
        let custom_id = event.custom_id();
        let class = classify(custom_id);

        if class == TokenClass::Ignore {
            debug!(kind = %kind, "Ignore sentinel triggered");
            return Ok(DispatchOutcome::Ignored);
        }

        if !event.in_cached_guild() {
            warn!(custom_id, user = %event.user(), "Rejected dispatch: guild not cached");
            return Err(ComponentHandleError::GuildNotCached {
                custom_id: custom_id.to_string(),
            });
        }

        let parts = match class {
            TokenClass::Minted(parts) => parts,
            TokenClass::Throw => {
                return Err(ComponentHandleError::ThrowComponentTriggered {
                    custom_id: custom_id.to_string(),
                });
            }
            TokenClass::Foreign | TokenClass::Ignore => {
                debug!(custom_id, "Custom id not minted by this registry");
                return Ok(DispatchOutcome::Ignored);
            }
        };

        if parts.version != self.version.as_str() {
            warn!(
                custom_id,
                minted = parts.version,
                current = self.version.as_str(),
                "Rejected dispatch: outdated component"
            );
            return Err(ComponentHandleError::OutdatedComponentTriggered {
                custom_id: custom_id.to_string(),
                minted: parts.version.to_string(),
                current: self.version.to_string(),
            });
        }

        let Some(template) = table.get(parts.template_id) else {
            debug!(identifier = parts.template_id, kind = %kind, "Template not found");
            return Err(ComponentHandleError::ComponentNotFound {
                identifier: parts.template_id.to_string(),
                kind,
            });
        };

        let instance_not_found = || ComponentHandleError::InstanceNotFound {
            identifier: parts.template_id.to_string(),
            instance_id: parts.instance_id.to_string(),
            kind,
        };

        let instance = self
            .store
            .get(parts.instance_id)
            .filter(|instance| {
                instance.template.kind == kind && instance.template.identifier == parts.template_id
            })
            .ok_or_else(|| {
                debug!(
                    identifier = parts.template_id,
                    instance_id = parts.instance_id,
                    "Instance not found"
                );
                instance_not_found()
            })?;

        if let Some(owner) = &instance.owner {
            if owner != event.user() {
                warn!(
                    user = %event.user(),
                    owner = %owner,
                    instance_id = parts.instance_id,
                    "Rejected dispatch: disallowed user"
                );
                return Err(ComponentHandleError::DisallowedUser {
                    user: event.user().clone(),
                    owner: owner.clone(),
                    instance_id: parts.instance_id.to_string(),
                });
            }
        }

        let dropper = InstanceDropper::new(self.store.clone(), parts.instance_id);
        match template
            .handler
            .invoke(event, instance.payload, dropper)
            .await
        {
            Ok(()) => {
                debug!(
                    identifier = parts.template_id,
                    instance_id = parts.instance_id,
                    kind = %kind,
                    component_kind = ?template.component_kind,
                    "Handled interaction"
                );
                Ok(DispatchOutcome::Handled)
            }
            Err(InvokeError::PayloadMismatch) => {
                warn!(
                    identifier = parts.template_id,
                    instance_id = parts.instance_id,
                    "Instance payload does not match template payload type"
                );
                Err(instance_not_found())
            }
            Err(InvokeError::Failed(source)) => Err(ComponentHandleError::ComponentThrown {
                identifier: parts.template_id.to_string(),
                kind,
                source: source.into(),
            }),
        }
    }
}

/// Validate a supplied identifier, or generate one not present in the table.
fn template_identifier(
    identifier: Option<String>,
    taken: impl Fn(&str) -> bool,
) -> Result<CustomIdField, RegistrationError> {
    match identifier {
        Some(identifier) => Ok(CustomIdField::non_empty(identifier)?),
        None => loop {
            let generated = CustomIdField::generate();
            if !taken(generated.as_str()) {
                break Ok(generated);
            }
        },
    }
}

#[async_trait]
impl ComponentDispatchApi for ComponentRegistry {
    async fn handle_component(
        &self,
        event: &ComponentEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        ComponentRegistry::handle_component(self, event).await
    }

    async fn handle_modal(
        &self,
        event: &ModalSubmitEvent,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        ComponentRegistry::handle_modal(self, event).await
    }

    async fn handle_interaction(
        &self,
        interaction: &Interaction,
    ) -> Result<DispatchOutcome, ComponentHandleError> {
        ComponentRegistry::handle_interaction(self, interaction).await
    }
}
