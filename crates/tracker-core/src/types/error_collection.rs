//! Field-keyed validation error collection.
//!
//! Mirrors the JSON body the REST layer returns for failed requests:
//! general messages in `errorMessages`, per-field messages in `errors`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Accumulates validation failures before an operation is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCollection {
    /// Messages not tied to a particular field.
    pub error_messages: Vec<String>,
    /// Messages keyed by the offending field name. Later messages for the
    /// same field replace earlier ones.
    pub errors: BTreeMap<String, String>,
    /// HTTP status hint, set by the REST layer when rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding a single general message.
    pub fn of(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_error_message(message);
        errors
    }

    /// Record a message against a field.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Record a general message.
    pub fn add_error_message(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }

    /// Whether any message has been recorded.
    pub fn has_any_errors(&self) -> bool {
        !self.error_messages.is_empty() || !self.errors.is_empty()
    }

    /// Return `Ok(())` when empty, or the collection itself as the error.
    pub fn into_result(self) -> Result<(), ErrorCollection> {
        if self.has_any_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}
