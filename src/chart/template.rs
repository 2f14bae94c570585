//! Per-entity URL templates
//!
//! The server renders chart URLs with a placeholder list address; depending
//! on how the template was produced the `@` may or may not be escaped.

use std::borrow::Cow;
use thiserror::Error;

/// Placeholder token in its literal form
pub const PLACEHOLDER: &str = "PLACEHOLDER@PLACEHOLDER";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("URL template {0:?} contains no placeholder")]
    MissingPlaceholder(String),
}

/// URL with a placeholder for the entity identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    raw: String,
}

fn encoded_placeholder() -> Cow<'static, str> {
    urlencoding::encode(PLACEHOLDER)
}

impl UrlTemplate {
    /// Build a template; it must contain the literal or encoded placeholder
    pub fn new(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();
        if !raw.contains(PLACEHOLDER) && !raw.contains(encoded_placeholder().as_ref()) {
            return Err(TemplateError::MissingPlaceholder(raw));
        }
        Ok(Self { raw })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Substitute `id` for the first literal and the first encoded placeholder
    pub fn expand(&self, id: &str) -> String {
        self.raw
            .replacen(PLACEHOLDER, id, 1)
            .replacen(encoded_placeholder().as_ref(), id, 1)
    }
}
