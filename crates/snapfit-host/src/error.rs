//! Error types for host-side building.

use std::fmt;

use snapfit_geometry::SnapError;
use thiserror::Error;

/// Errors raised while building a feature in a CAD host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The parameters were rejected or the geometry could not be computed.
    #[error(transparent)]
    Snap(#[from] SnapError),

    /// A host API call failed.
    #[error("host operation {operation} failed: {message}")]
    Operation {
        /// Name of the failed adapter call.
        operation: &'static str,
        /// Message reported by the host.
        message: String,
    },
}

impl HostError {
    /// Wrap a failure reported by the host API.
    pub fn operation(operation: &'static str, message: impl fmt::Display) -> Self {
        HostError::Operation {
            operation,
            message: message.to_string(),
        }
    }
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
