//! Extrusion plans handed to the host along with each outline.

use serde::{Deserialize, Serialize};
use snapfit_math::Vec3;
use snapfit_profile::ProfileOutline;

use crate::variant::FeatureVariant;

/// A one-sided extrusion perpendicular to the sketch plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    /// Extruded length.
    pub distance: f64,
    /// Offset of the start face from the sketch plane.
    pub start_offset: f64,
}

impl Extrusion {
    /// Extrusion starting on the sketch plane.
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            start_offset: 0.0,
        }
    }

    /// Extrusion whose start face is moved by `start_offset`.
    pub fn with_start_offset(distance: f64, start_offset: f64) -> Self {
        Self {
            distance,
            start_offset,
        }
    }

    /// Position of the end face.
    pub fn end(&self) -> f64 {
        self.start_offset + self.distance
    }
}

/// Which body absorbs the extrusion gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapCarrier {
    /// The cut body grows by the gap on both faces; the join body keeps the
    /// nominal distance.
    CutBody,
    /// The cut body keeps the nominal distance (shifted back by the gap); the
    /// join body shrinks by the gap on both faces.
    JoinBody,
}

impl GapCarrier {
    /// Join and cut extrusions for a nominal `distance` and extrusion `gap`.
    pub fn plan(&self, distance: f64, gap: f64) -> (Extrusion, Extrusion) {
        match self {
            GapCarrier::CutBody => (
                Extrusion::new(distance),
                Extrusion::with_start_offset(distance + 2.0 * gap, -gap),
            ),
            GapCarrier::JoinBody => (
                Extrusion::new(distance - 2.0 * gap),
                Extrusion::with_start_offset(distance, -gap),
            ),
        }
    }
}

/// Extrusions for every body a feature produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionPlan {
    /// The snap body.
    pub join: Extrusion,
    /// The clearance body carved from the mating part.
    pub cut: Extrusion,
    /// The support body, for variants that have one.
    pub addition: Option<Extrusion>,
}

/// An outline together with how to extrude it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPlan {
    /// The closed 2D outline.
    pub outline: ProfileOutline,
    /// How far and from where to extrude it.
    pub extrusion: Extrusion,
}

/// Everything the host needs to build one snap feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGeometry {
    /// Feature family the geometry was built for.
    pub variant: FeatureVariant,
    /// The snap body.
    pub join: BodyPlan,
    /// The clearance body.
    pub cut: BodyPlan,
    /// Half of the support body (the host mirrors it for the other half).
    pub addition: Option<BodyPlan>,
    /// Offset of the feature's local origin (extrusion axis, width axis, unused).
    pub offset: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gap_in_cut_body() {
        let (join, cut) = GapCarrier::CutBody.plan(0.6, 0.015);
        assert_eq!(join, Extrusion::new(0.6));
        assert_relative_eq!(cut.distance, 0.63, epsilon = 1e-12);
        assert_relative_eq!(cut.start_offset, -0.015);
        assert_relative_eq!(cut.end(), 0.615, epsilon = 1e-12);
    }

    #[test]
    fn test_gap_in_join_body() {
        let (join, cut) = GapCarrier::JoinBody.plan(0.9, 0.015);
        assert_relative_eq!(join.distance, 0.87, epsilon = 1e-12);
        assert_eq!(join.start_offset, 0.0);
        assert_eq!(cut.distance, 0.9);
        assert_relative_eq!(cut.start_offset, -0.015);
    }
}
