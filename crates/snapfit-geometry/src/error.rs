//! Error types for profile generation.

use snapfit_params::{RangeViolation, ValidationError};
use snapfit_profile::ProfileError;
use thiserror::Error;

/// Errors raised while turning a parameter set into feature geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapError {
    /// The parameter set does not match the variant's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A physical constraint is violated. Recoverable: fix the input.
    #[error("input invalid: {0}")]
    Range(#[from] RangeViolation),

    /// The computed outline is unusable (non-finite coordinates, bad indices).
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(#[from] ProfileError),

    /// A placement value is not one of `top`, `middle`, `bottom`.
    #[error("unknown location {0:?}")]
    UnknownLocation(String),

    /// A feature variant name was not recognized.
    #[error("unknown feature variant {0:?}")]
    UnknownVariant(String),
}

impl SnapError {
    /// Whether this is an ordinary out-of-range input rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SnapError::Range(_))
    }
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, SnapError>;
