//! Template identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which table a template lives in. Components and modals never collide,
/// even under the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Component,
    Modal,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Modal => "modal",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The template an instance was minted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    pub kind: TemplateKind,
    pub identifier: String,
}

impl TemplateRef {
    pub fn new(kind: TemplateKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }

    pub fn component(identifier: impl Into<String>) -> Self {
        Self::new(TemplateKind::Component, identifier)
    }

    pub fn modal(identifier: impl Into<String>) -> Self {
        Self::new(TemplateKind::Modal, identifier)
    }
}
