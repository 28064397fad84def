//! Error types for parameter validation.

use thiserror::Error;

/// Errors raised when a parameter set does not conform to its schema.
///
/// Both variants indicate a programming error between caller and engine
/// (or a corrupt stored profile) and are not expected during normal editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The key set differs from the schema's key set.
    #[error("parameter keys do not match the schema (missing: {missing:?}, unexpected: {extra:?})")]
    SchemaMismatch {
        /// Schema keys absent from the parameter set, sorted.
        missing: Vec<String>,
        /// Parameter keys the schema does not declare, sorted.
        extra: Vec<String>,
    },

    /// A value's kind is not allowed for its key.
    #[error("parameter {key} has the wrong kind: expected {expected}, found {found}")]
    TypeMismatch {
        /// Offending key.
        key: String,
        /// Human-readable description of the allowed kinds.
        expected: String,
        /// Human-readable description of the value found.
        found: String,
    },
}

impl ValidationError {
    pub(crate) fn missing(key: &str) -> Self {
        ValidationError::SchemaMismatch {
            missing: vec![key.to_string()],
            extra: Vec::new(),
        }
    }
}

/// A violated physical or relational constraint on parameter values.
///
/// This is the ordinary outcome of a user mid-edit and is recoverable:
/// callers gate committing on it rather than aborting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RangeViolation {
    /// Stable identifier of the violated rule (e.g. `"length_min"`).
    pub rule: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

impl RangeViolation {
    /// Create a violation for `rule`.
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Result type for schema validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
