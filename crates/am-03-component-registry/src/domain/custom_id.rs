//! Custom id codec
//!
//! A custom id is embedded in every outbound button, select menu and modal:
//!
//! ```text
//! amber-handler::.<version>.<template id>.<instance id>
//! ```
//!
//! Fields are joined with `.` and never escaped. `CustomIdField` rejects the
//! separator at construction, so every token this crate encodes decodes back
//! to the same four fields.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

use crate::error::FieldError;

/// Prefix identifying tokens minted by this registry.
pub const CUSTOM_ID_PREFIX: &str = "amber-handler::";

/// Separator between the four token fields.
pub const CUSTOM_ID_SEPARATOR: char = '.';

/// Always skipped by dispatch, before any other check.
pub const IGNORE_SENTINEL: &str = "amber-handler::__IGNORE__";

/// Always fails dispatch with `THROW_COMPONENT_TRIGGERED`.
pub const THROW_SENTINEL: &str = "amber-handler::__THROW__";

/// Platform limit on custom id length.
pub const MAX_CUSTOM_ID_LEN: usize = 100;

/// Length of generated template and instance identifiers.
pub const GENERATED_ID_LEN: usize = 20;

/// A token field guaranteed not to contain the separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CustomIdField(String);

impl CustomIdField {
    /// Accepts any value without the separator, including the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        if value.contains(CUSTOM_ID_SEPARATOR) {
            return Err(FieldError::ContainsSeparator {
                value,
                separator: CUSTOM_ID_SEPARATOR,
            });
        }
        Ok(Self(value))
    }

    /// Like `new`, but also rejects the empty string.
    pub fn non_empty(value: impl Into<String>) -> Result<Self, FieldError> {
        let field = Self::new(value)?;
        if field.0.is_empty() {
            return Err(FieldError::Empty);
        }
        Ok(field)
    }

    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(generate_identifier())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomIdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four fields of a decoded token, borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomIdParts<'a> {
    pub prefix: &'a str,
    pub version: &'a str,
    pub template_id: &'a str,
    pub instance_id: &'a str,
}

/// How dispatch should treat a raw custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass<'a> {
    /// The ignore sentinel.
    Ignore,
    /// The throw sentinel.
    Throw,
    /// Not minted by this registry.
    Foreign,
    /// One of ours, ready for the version check.
    Minted(CustomIdParts<'a>),
}

/// Join the four fields into a token.
pub fn encode(
    prefix: &str,
    version: &CustomIdField,
    template_id: &CustomIdField,
    instance_id: &CustomIdField,
) -> String {
    let mut token = String::with_capacity(
        prefix.len() + version.0.len() + template_id.0.len() + instance_id.0.len() + 3,
    );
    token.push_str(prefix);
    for field in [version, template_id, instance_id] {
        token.push(CUSTOM_ID_SEPARATOR);
        token.push_str(&field.0);
    }
    token
}

/// Split a token into exactly four fields; any other shape is `None`.
pub fn decode(token: &str) -> Option<CustomIdParts<'_>> {
    let mut fields = token.split(CUSTOM_ID_SEPARATOR);
    let parts = CustomIdParts {
        prefix: fields.next()?,
        version: fields.next()?,
        template_id: fields.next()?,
        instance_id: fields.next()?,
    };
    if fields.next().is_some() {
        return None;
    }
    Some(parts)
}

/// Classify a token. Sentinels are matched on the whole token.
pub fn classify(token: &str) -> TokenClass<'_> {
    match token {
        IGNORE_SENTINEL => TokenClass::Ignore,
        THROW_SENTINEL => TokenClass::Throw,
        _ => match decode(token) {
            Some(parts) if parts.prefix == CUSTOM_ID_PREFIX => TokenClass::Minted(parts),
            _ => TokenClass::Foreign,
        },
    }
}

/// Random alphanumeric identifier of `GENERATED_ID_LEN` characters.
pub fn generate_identifier() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}
