#![warn(missing_docs)]

//! Parameter sets, schemas and validation for snap-fit features.
//!
//! A [`ParameterSet`] is a flat name → value mapping assembled by a caller
//! (GUI fields, a stored preset, a test). Each feature family declares a
//! [`ParameterSchema`]; [`validate`] checks that a set carries exactly the
//! declared keys with allowed value kinds. Physical range rules are
//! feature-specific and report a [`RangeViolation`].
//!
//! # Example
//!
//! ```
//! use snapfit_params::{validate, FieldGroup, FieldSpec, ParameterSchema, ParameterSet};
//!
//! const FIELDS: &[FieldSpec] = &[
//!     FieldSpec::number("length", FieldGroup::Geometry),
//!     FieldSpec::choice("x_location", &["top", "middle", "bottom"]),
//! ];
//! let schema = ParameterSchema::new("demo", FIELDS);
//!
//! let params = ParameterSet::new()
//!     .with("length", 1.2)
//!     .with("x_location", "middle");
//! assert!(validate(&params, &schema).is_ok());
//! ```

pub mod error;
pub mod schema;
pub mod set;

pub use error::{RangeViolation, Result, ValidationError};
pub use schema::{validate, FieldGroup, FieldSpec, ParameterSchema, ValueKind};
pub use set::{ParamValue, ParameterSet};
