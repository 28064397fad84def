//! Error types for the profile library.

use snapfit_geometry::FeatureVariant;
use snapfit_params::ValidationError;
use thiserror::Error;

/// Errors raised while loading, editing or resolving a profile library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The library file could not be read or written.
    #[error("profile library I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or has the wrong top-level shape.
    #[error("malformed profile library: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored or submitted record does not carry the family's keys.
    #[error("entry {entry:?} does not fit the {variant} schema: {source}")]
    Invalid {
        /// Name of the profile or gap profile.
        entry: String,
        /// Family the library is bound to.
        variant: FeatureVariant,
        /// What is wrong with the record.
        source: ValidationError,
    },

    /// A profile or gap profile of this name already exists.
    #[error("an entry named {0:?} already exists")]
    DuplicateName(String),

    /// No profile of this name exists.
    #[error("unknown profile {0:?}")]
    UnknownProfile(String),

    /// No gap profile of this name exists.
    #[error("unknown gap profile {0:?}")]
    UnknownGapProfile(String),

    /// The default profile cannot be deleted.
    #[error("profile {0:?} is the default and cannot be deleted")]
    DeleteDefault(String),
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
