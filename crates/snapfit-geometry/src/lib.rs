#![warn(missing_docs)]

//! Parametric snap-fit geometry.
//!
//! Turns a validated [`ParameterSet`] into the 2D outlines of a snap feature:
//! the join body, the clearance cut carved from the mating part, and for the
//! pin family a support body. Each outline comes with its extrusion and the
//! feature carries the placement offset of its local origin.
//!
//! All families share the beam-deflection nose model in [`beam`]. Range rules
//! run before any coordinate is computed; the profile code itself does no
//! checking beyond rejecting non-finite output.
//!
//! # Example
//!
//! ```
//! use snapfit_geometry::{build, FeatureVariant, Location};
//!
//! let variant = FeatureVariant::Cantilever;
//! let params = variant.default_parameters(Location::Middle, Location::Top);
//! let geometry = build(variant, &params).unwrap();
//!
//! assert_eq!(geometry.join.outline.len(), 12);
//! assert_eq!(geometry.join.outline.arcs().len(), 2);
//! assert!(geometry.cut.outline.is_line_only());
//! assert!((geometry.offset.x - 0.3).abs() < 1e-12);
//! ```

pub mod beam;
pub mod cantilever;
pub mod cantilever_pin;
pub mod error;
pub mod extrusion;
pub mod pin;
pub mod placement;
pub mod scaling;
pub mod shape;
pub mod variant;

pub use beam::{nose_height, nose_run, Blend, Nose};
pub use cantilever::Cantilever;
pub use cantilever_pin::CantileverPin;
pub use error::{Result, SnapError};
pub use extrusion::{BodyPlan, Extrusion, ExtrusionPlan, FeatureGeometry, GapCarrier};
pub use pin::Pin;
pub use placement::{Location, LOCATIONS};
pub use scaling::{
    cantilever_pin_size_parameters, cantilever_size_parameters, pin_size_parameters,
    DEFAULT_ASPECT_RATIO,
};
pub use shape::SnapShape;
pub use variant::FeatureVariant;

pub use snapfit_params::{ParameterSet, RangeViolation};

/// Build the complete geometry of one snap feature.
///
/// Runs schema validation, the family's range rules, outline generation,
/// extrusion planning and placement in that order.
pub fn build(variant: FeatureVariant, params: &ParameterSet) -> Result<FeatureGeometry> {
    variant.build(params)
}

/// Check `params` against `variant` without building anything.
///
/// Cheap and side-effect free, so it can run on every edit.
pub fn validate_ranges(variant: FeatureVariant, params: &ParameterSet) -> Result<()> {
    variant.validate_ranges(params)
}
