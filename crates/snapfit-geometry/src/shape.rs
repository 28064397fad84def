//! The capability set every snap variant implements.

use snapfit_math::Vec3;
use snapfit_params::RangeViolation;
use snapfit_profile::{ProfileError, ProfileOutline};

use crate::extrusion::ExtrusionPlan;

/// Typed parameters of one snap variant and the geometry derived from them.
///
/// Profile functions assume [`SnapShape::validate_ranges`] has passed; they
/// do no range checking of their own.
pub trait SnapShape {
    /// Check physical constraints in a fixed order; the first failure wins.
    fn validate_ranges(&self) -> Result<(), RangeViolation>;

    /// Outline of the snap body itself.
    fn join_profile(&self) -> Result<ProfileOutline, ProfileError>;

    /// Outline of the clearance body carved from the mating part.
    fn cut_profile(&self) -> Result<ProfileOutline, ProfileError>;

    /// Outline of a support body around the cut, if the variant has one.
    fn addition_profile(&self) -> Result<Option<ProfileOutline>, ProfileError> {
        Ok(None)
    }

    /// Offset of the local origin for the chosen placement.
    fn offset(&self) -> Vec3;

    /// Extrusion of each body.
    fn extrusions(&self) -> ExtrusionPlan;
}

/// Fail with `rule` unless `ok` holds.
///
/// Conditions are phrased as what must hold, so NaN inputs fail.
pub(crate) fn ensure(
    ok: bool,
    rule: &'static str,
    message: impl FnOnce() -> String,
) -> Result<(), RangeViolation> {
    if ok {
        Ok(())
    } else {
        Err(RangeViolation::new(rule, message()))
    }
}
