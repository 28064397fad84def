//! Pin with support bodies.
//!
//! A pre-strained pin whose hole is sized for the nominal strain only, so
//! the pin stays loaded once seated. Besides the pin and its hole the
//! variant produces a support body on each side of the hole; only one half
//! is generated here and the host mirrors it.

use snapfit_math::{Point2, Vec3};
use snapfit_params::{FieldGroup, FieldSpec, ParameterSchema, ParameterSet, RangeViolation};
use snapfit_profile::{ProfileError, ProfileOutline, Symmetry};

use crate::beam::nose_height;
use crate::cantilever::MIN_NOSE_ANGLE;
use crate::cantilever_pin::MAX_NOSE_ANGLE;
use crate::error::Result;
use crate::extrusion::{Extrusion, ExtrusionPlan, GapCarrier};
use crate::placement::{symmetric_offset, Location, LOCATIONS};
use crate::scaling::{pin_size_parameters, DEFAULT_ASPECT_RATIO};
use crate::shape::{ensure, SnapShape};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("strain", FieldGroup::Geometry),
    FieldSpec::number("pin_prestrain", FieldGroup::Geometry),
    FieldSpec::number("extrusion_distance", FieldGroup::Geometry),
    FieldSpec::number("thickness", FieldGroup::Geometry),
    FieldSpec::number("wall_thickness", FieldGroup::Geometry),
    FieldSpec::number("length", FieldGroup::Geometry),
    FieldSpec::number("width", FieldGroup::Geometry),
    FieldSpec::number("ledge", FieldGroup::Geometry),
    FieldSpec::number("middle_padding", FieldGroup::Geometry),
    FieldSpec::number("nose_angle", FieldGroup::Geometry),
    FieldSpec::number("gap_buffer", FieldGroup::Geometry),
    FieldSpec::number("length_gap", FieldGroup::Gap),
    FieldSpec::number("width_gap", FieldGroup::Gap),
    FieldSpec::number("gap_extrusion", FieldGroup::Gap),
    FieldSpec::number("extra_length", FieldGroup::Gap),
    FieldSpec::choice("x_location", LOCATIONS),
    FieldSpec::choice("y_location", LOCATIONS),
];

/// Schema of the pin family.
pub const SCHEMA: ParameterSchema = ParameterSchema::new("pin", FIELDS);

/// Stock pin dimensions: the unit size plus strain and nose settings.
pub fn default_geometry() -> ParameterSet {
    pin_size_parameters(1.0, DEFAULT_ASPECT_RATIO)
        .with("strain", 0.012)
        .with("pin_prestrain", 0.012)
        .with("nose_angle", 70.0)
}

/// Stock pin clearances.
pub fn default_gaps() -> ParameterSet {
    ParameterSet::new()
        .with("length_gap", 0.01)
        .with("width_gap", 0.005)
        .with("gap_extrusion", 0.01)
        .with("extra_length", 0.05)
}

/// Typed pin parameters. The nose angle is kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    /// Strain the hole is sized for.
    pub strain: f64,
    /// Extra strain built into the pin.
    pub pin_prestrain: f64,
    /// Extrusion depth of the pin.
    pub extrusion_distance: f64,
    /// Arm thickness.
    pub thickness: f64,
    /// Wall thickness of the support bodies.
    pub wall_thickness: f64,
    /// Arm length.
    pub length: f64,
    /// Overall pin width.
    pub width: f64,
    /// Height of the retaining ledge.
    pub ledge: f64,
    /// Length of the solid center section.
    pub middle_padding: f64,
    /// Nose angle in degrees.
    pub nose_angle: f64,
    /// Material kept between the arms (informational).
    pub gap_buffer: f64,
    /// Clearance along the arms.
    pub length_gap: f64,
    /// Clearance across the arms.
    pub width_gap: f64,
    /// Clearance along the extrusion axis.
    pub gap_extrusion: f64,
    /// Extra hole length past the noses.
    pub extra_length: f64,
    /// Placement along the extrusion axis.
    pub x_location: Location,
    /// Placement across the width.
    pub y_location: Location,
}

impl Pin {
    /// Read typed parameters from a set.
    pub fn from_params(params: &ParameterSet) -> Result<Self> {
        Ok(Self {
            strain: params.number("strain")?,
            pin_prestrain: params.number("pin_prestrain")?,
            extrusion_distance: params.number("extrusion_distance")?,
            thickness: params.number("thickness")?,
            wall_thickness: params.number("wall_thickness")?,
            length: params.number("length")?,
            width: params.number("width")?,
            ledge: params.number("ledge")?,
            middle_padding: params.number("middle_padding")?,
            nose_angle: params.number("nose_angle")?,
            gap_buffer: params.number("gap_buffer")?,
            length_gap: params.number("length_gap")?,
            width_gap: params.number("width_gap")?,
            gap_extrusion: params.number("gap_extrusion")?,
            extra_length: params.number("extra_length")?,
            x_location: Location::read(params, "x_location")?,
            y_location: Location::read(params, "y_location")?,
        })
    }

    /// Space left between the two arms.
    pub fn middle_flat(&self) -> f64 {
        self.width / 2.0 - self.thickness - self.width_gap
    }

    /// Nose height of the pre-strained pin.
    pub fn pin_nose_height(&self) -> f64 {
        nose_height(self.strain + self.pin_prestrain, self.length, self.thickness)
    }

    /// Nose height of the hole the pin seats in.
    pub fn hole_nose_height(&self) -> f64 {
        nose_height(self.strain, self.length, self.thickness)
    }

    fn tan(&self) -> f64 {
        self.nose_angle.to_radians().tan()
    }
}

impl SnapShape for Pin {
    fn validate_ranges(&self) -> std::result::Result<(), RangeViolation> {
        ensure(self.length > 0.0, "length_positive", || {
            "length must be positive".into()
        })?;
        ensure(self.width > 0.0, "width_positive", || {
            "width must be positive".into()
        })?;
        ensure(self.thickness > 0.0, "thickness_positive", || {
            "thickness must be positive".into()
        })?;
        ensure(self.middle_flat() > 0.0, "middle_flat_positive", || {
            "width is too small for thickness and width gap".into()
        })?;
        ensure(self.middle_padding > 0.0, "middle_padding_positive", || {
            "middle padding must be positive".into()
        })?;
        ensure(self.ledge >= 0.0, "ledge_negative", || {
            "ledge must not be negative".into()
        })?;
        ensure(self.strain >= 0.0, "strain_negative", || {
            "strain must not be negative".into()
        })?;
        ensure(self.pin_prestrain >= 0.0, "prestrain_negative", || {
            "pin prestrain must not be negative".into()
        })?;
        ensure(self.extrusion_distance > 0.0, "extrusion_positive", || {
            "extrusion distance must be positive".into()
        })?;
        ensure(
            self.extrusion_distance > 2.0 * self.gap_extrusion,
            "extrusion_gap",
            || "extrusion distance must exceed twice the extrusion gap".into(),
        )?;
        ensure(self.wall_thickness >= 0.0, "wall_thickness_negative", || {
            "wall thickness must not be negative".into()
        })?;
        ensure(self.gap_buffer >= 0.0, "gap_buffer_negative", || {
            "gap buffer must not be negative".into()
        })?;
        ensure(
            (MIN_NOSE_ANGLE..=MAX_NOSE_ANGLE).contains(&self.nose_angle),
            "nose_angle_range",
            || format!("nose angle must be between {MIN_NOSE_ANGLE} and {MAX_NOSE_ANGLE} degrees"),
        )?;
        ensure(
            self.length_gap >= 0.0 && self.width_gap >= 0.0 && self.gap_extrusion >= 0.0,
            "gap_negative",
            || "gaps must not be negative".into(),
        )?;
        ensure(self.extra_length >= 0.0, "extra_length_negative", || {
            "extra length must not be negative".into()
        })
    }

    fn join_profile(&self) -> std::result::Result<ProfileOutline, ProfileError> {
        let l = self.length;
        let th = self.thickness;
        let mp = self.middle_padding;
        let outer = self.width / 2.0 - self.width_gap;
        let tan = self.tan();
        let nh = self.pin_nose_height();
        let off_x = (nh - self.hole_nose_height()) / tan;
        let nx = nh / tan;
        let head = 0.2 * l;
        let tip = 0.05 * l;

        let p2 = Point2::new(mp, outer - th);
        let p3 = Point2::new(mp + l + self.length_gap, outer - th / 2.0);
        let slope = (p3.y - p2.y) / (p3.x - p2.x);
        let p4 = Point2::new(p3.x + nx + head, p3.y + slope * (nx + head));

        // Points 0 and 3 are construction points.
        let quadrant = vec![
            Point2::new(0.0, 0.0),
            Point2::new(mp, 0.0),
            p2,
            p3,
            p4,
            Point2::new(p4.x, p4.y + nh / 2.0),
            Point2::new(p3.x + nx + tip, outer + nh),
            Point2::new(p3.x + nx - off_x, outer + nh),
            Point2::new(p3.x - off_x, outer),
            Point2::new(self.ledge, outer),
            Point2::new(0.0, outer + self.ledge),
        ];
        let lines = [
            (1, 2),
            (2, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (9, 10),
        ];

        ProfileOutline::mirrored(quadrant, &lines, &[], Symmetry::Full)
    }

    fn cut_profile(&self) -> std::result::Result<ProfileOutline, ProfileError> {
        let l = self.length;
        let mp = self.middle_padding;
        let half_w = self.width / 2.0;
        let tan = self.tan();
        let nh_hole = self.hole_nose_height();
        let nx = self.pin_nose_height() / tan;
        let total = mp + l + nx + 0.2 * l + self.extra_length;

        let quadrant = vec![
            Point2::new(0.0, 0.0),
            Point2::new(total, 0.0),
            Point2::new(total, half_w + nh_hole),
            Point2::new(mp + l + nh_hole / tan, half_w + nh_hole),
            Point2::new(mp + l, half_w),
            Point2::new(self.ledge, half_w),
            Point2::new(0.0, half_w + self.ledge),
        ];
        let lines = [(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)];

        ProfileOutline::mirrored(quadrant, &lines, &[], Symmetry::Full)
    }

    fn addition_profile(&self) -> std::result::Result<Option<ProfileOutline>, ProfileError> {
        let l = self.length;
        let mp = self.middle_padding;
        let wt = self.wall_thickness;
        let half_w = self.width / 2.0;
        let nh = self.pin_nose_height();
        let nh_hole = self.hole_nose_height();
        let x_a = mp + l + self.extra_length + nh / self.tan() + 0.05 * l;

        let quadrant = vec![
            Point2::new(0.0, 0.0),
            Point2::new(x_a, 0.0),
            Point2::new(x_a, half_w + nh_hole + wt),
            Point2::new(mp + l, half_w + nh_hole + wt),
            Point2::new(mp + l - nh, half_w + wt),
            Point2::new(0.0, half_w + wt),
        ];
        let lines = [(1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];

        ProfileOutline::mirrored(quadrant, &lines, &[], Symmetry::Half).map(Some)
    }

    fn offset(&self) -> Vec3 {
        symmetric_offset(
            self.x_location,
            self.y_location,
            self.extrusion_distance,
            self.width,
            self.gap_extrusion,
        )
    }

    fn extrusions(&self) -> ExtrusionPlan {
        let (join, cut) = GapCarrier::JoinBody.plan(self.extrusion_distance, self.gap_extrusion);
        let wt = self.wall_thickness;
        ExtrusionPlan {
            join,
            cut,
            addition: Some(Extrusion::with_start_offset(
                self.extrusion_distance + 2.0 * wt,
                -wt,
            )),
        }
    }
}
