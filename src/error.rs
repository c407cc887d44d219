//! Error types for schema parsing

use serde_json::Value;
use thiserror::Error;

/// Error raised when a schema document violates a structural rule.
///
/// Every parse failure carries a short description of the violated rule
/// plus the serialized offending fragment, so a bad schema can be located
/// inside a large document from the message alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid schema: {message}; offending fragment: {fragment}")]
pub struct InvalidSchemaError {
    message: String,
    fragment: String,
}

impl InvalidSchemaError {
    /// Create an error for a rule violation at the given schema fragment.
    pub fn new(message: impl Into<String>, fragment: &Value) -> Self {
        Self {
            message: message.into(),
            fragment: fragment.to_string(),
        }
    }

    /// Create an error where the offending input is not a JSON value,
    /// such as unparseable JSON text.
    pub fn with_fragment(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fragment: fragment.into(),
        }
    }

    /// The rule-violation description, without the fragment.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The serialized offending fragment.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}
