//! Cantilever pin: two opposing filleted arms around a center slot.
//!
//! Both outlines are drawn as one quadrant and mirrored into four blocks.

use snapfit_math::{Point2, Tolerance, Vec3};
use snapfit_params::{FieldGroup, FieldSpec, ParameterSchema, ParameterSet, RangeViolation};
use snapfit_profile::{ArcSegment, ProfileError, ProfileOutline, Symmetry};

use crate::beam::{Blend, Nose};
use crate::cantilever::{MIN_LENGTH, MIN_NOSE_ANGLE};
use crate::error::Result;
use crate::extrusion::{ExtrusionPlan, GapCarrier};
use crate::placement::{symmetric_offset, Location, LOCATIONS};
use crate::shape::{ensure, SnapShape};

/// Narrowest pin the family supports.
pub const MIN_WIDTH: f64 = 0.3;

/// Largest nose angle in degrees.
pub const MAX_NOSE_ANGLE: f64 = 140.0;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("inner_radius", FieldGroup::Geometry),
    FieldSpec::number("strain", FieldGroup::Geometry),
    FieldSpec::number("extrusion_distance", FieldGroup::Geometry),
    FieldSpec::number("thickness", FieldGroup::Geometry),
    FieldSpec::number("length", FieldGroup::Geometry),
    FieldSpec::number("width", FieldGroup::Geometry),
    FieldSpec::number("ledge", FieldGroup::Geometry),
    FieldSpec::number("middle_padding", FieldGroup::Geometry),
    FieldSpec::number("nose_angle", FieldGroup::Geometry),
    FieldSpec::number("gap_length", FieldGroup::Gap),
    FieldSpec::number("gap_thickness", FieldGroup::Gap),
    FieldSpec::number("gap_extrusion", FieldGroup::Gap),
    FieldSpec::number("extra_length", FieldGroup::Gap),
    FieldSpec::choice("x_location", LOCATIONS),
    FieldSpec::choice("y_location", LOCATIONS),
];

/// Schema of the cantilever pin family.
pub const SCHEMA: ParameterSchema = ParameterSchema::new("cantilever_pin", FIELDS);

/// Stock cantilever pin dimensions.
pub fn default_geometry() -> ParameterSet {
    ParameterSet::new()
        .with("thickness", 0.3)
        .with("length", 1.2)
        .with("width", 0.9)
        .with("extrusion_distance", 0.9)
        .with("strain", 0.02)
        .with("inner_radius", 0.1)
        .with("ledge", 0.1)
        .with("middle_padding", 0.3)
        .with("nose_angle", 70.0)
}

/// Stock clearances, shared with the cantilever.
pub fn default_gaps() -> ParameterSet {
    crate::cantilever::default_gaps()
}

/// Typed cantilever pin parameters. The nose angle is kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CantileverPin {
    /// Radius of the fillet where each arm leaves the slot.
    pub inner_radius: f64,
    /// Design strain used to size the noses.
    pub strain: f64,
    /// Extrusion depth of the pin.
    pub extrusion_distance: f64,
    /// Arm thickness.
    pub thickness: f64,
    /// Arm length.
    pub length: f64,
    /// Overall pin width.
    pub width: f64,
    /// Height of the retaining ledge.
    pub ledge: f64,
    /// Width of the center slot.
    pub middle_padding: f64,
    /// Nose angle in degrees.
    pub nose_angle: f64,
    /// Clearance along the arms.
    pub gap_length: f64,
    /// Clearance across the arms.
    pub gap_thickness: f64,
    /// Clearance along the extrusion axis.
    pub gap_extrusion: f64,
    /// Extra cut length past the noses.
    pub extra_length: f64,
    /// Placement along the extrusion axis.
    pub x_location: Location,
    /// Placement across the width.
    pub y_location: Location,
}

impl CantileverPin {
    /// Read typed parameters from a set.
    pub fn from_params(params: &ParameterSet) -> Result<Self> {
        Ok(Self {
            inner_radius: params.number("inner_radius")?,
            strain: params.number("strain")?,
            extrusion_distance: params.number("extrusion_distance")?,
            thickness: params.number("thickness")?,
            length: params.number("length")?,
            width: params.number("width")?,
            ledge: params.number("ledge")?,
            middle_padding: params.number("middle_padding")?,
            nose_angle: params.number("nose_angle")?,
            gap_length: params.number("gap_length")?,
            gap_thickness: params.number("gap_thickness")?,
            gap_extrusion: params.number("gap_extrusion")?,
            extra_length: params.number("extra_length")?,
            x_location: Location::read(params, "x_location")?,
            y_location: Location::read(params, "y_location")?,
        })
    }

    /// Material left between the arms' fillets and the slot.
    pub fn middle_flat(&self) -> f64 {
        self.width / 2.0 - self.thickness - self.inner_radius - self.gap_thickness
    }

    fn blend(&self) -> Blend {
        Blend::new(self.length, self.thickness, self.inner_radius)
    }

    fn nose(&self) -> Nose {
        let arm = self.length - self.blend().dx - self.middle_padding / 2.0;
        Nose::new(
            self.strain,
            arm,
            self.thickness,
            self.nose_angle.to_radians(),
        )
    }
}

impl SnapShape for CantileverPin {
    fn validate_ranges(&self) -> std::result::Result<(), RangeViolation> {
        ensure(self.length >= MIN_LENGTH, "length_min", || {
            format!("length must be at least {MIN_LENGTH}")
        })?;
        ensure(self.width >= MIN_WIDTH, "width_min", || {
            format!("width must be at least {MIN_WIDTH}")
        })?;
        ensure(self.inner_radius >= 0.0, "inner_radius_negative", || {
            "inner radius must not be negative".into()
        })?;
        ensure(self.inner_radius < self.length, "inner_radius_length", || {
            "inner radius must be smaller than the length".into()
        })?;
        ensure(self.thickness > 0.0, "thickness_positive", || {
            "thickness must be positive".into()
        })?;
        ensure(self.middle_flat() >= 0.0, "middle_flat_negative", || {
            "width is too small for thickness, inner radius and gap".into()
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
        ensure(self.extrusion_distance > 0.0, "extrusion_positive", || {
            "extrusion distance must be positive".into()
        })?;
        ensure(
            self.extrusion_distance > 2.0 * self.gap_extrusion,
            "extrusion_gap",
            || "extrusion distance must exceed twice the extrusion gap".into(),
        )?;
        ensure(
            (MIN_NOSE_ANGLE..=MAX_NOSE_ANGLE).contains(&self.nose_angle),
            "nose_angle_range",
            || format!("nose angle must be between {MIN_NOSE_ANGLE} and {MAX_NOSE_ANGLE} degrees"),
        )?;
        ensure(
            self.gap_length >= 0.0 && self.gap_thickness >= 0.0 && self.gap_extrusion >= 0.0,
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
        let r = self.inner_radius;
        let half_pad = self.middle_padding / 2.0;
        let gl = self.gap_length;
        let outer = self.width / 2.0 - self.gap_thickness;
        let blend = self.blend();
        let nose = self.nose();
        let in_flat = outer - th - blend.dy;
        let tip = 1.2 * l + nose.run + gl;
        let base = in_flat + blend.dy;

        let quadrant = vec![
            Point2::new(half_pad, in_flat),
            Point2::new(half_pad + r, in_flat),
            Point2::new(half_pad + blend.dx, base),
            Point2::new(tip, base + 0.625 * th),
            Point2::new(tip, base + 0.75 * th),
            Point2::new(1.07 * l + nose.run + gl, base + th + nose.height),
            Point2::new(l + nose.run + gl, base + th + nose.height),
            Point2::new(l + gl, outer),
            Point2::new(self.ledge, outer),
            Point2::new(self.ledge, outer),
            Point2::new(self.ledge, outer),
            Point2::new(0.0, outer + self.ledge),
            Point2::new(half_pad, 0.0),
        ];
        let lines = [
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (9, 10),
            (10, 11),
            (12, 0),
        ];
        let arcs = if Tolerance::DEFAULT.is_zero(r) {
            Vec::new()
        } else {
            vec![ArcSegment::new(1, 0, -blend.angle)]
        };

        ProfileOutline::mirrored(quadrant, &lines, &arcs, Symmetry::Full)
    }

    fn cut_profile(&self) -> std::result::Result<ProfileOutline, ProfileError> {
        let l = self.length;
        let half_w = self.width / 2.0;
        let nose = self.nose();
        let total = 1.2 * l + nose.run + self.extra_length;

        let quadrant = vec![
            Point2::new(total, 0.0),
            Point2::new(total, half_w + nose.height),
            Point2::new(l + nose.run, half_w + nose.height),
            Point2::new(l, half_w),
            Point2::new(self.ledge, half_w),
            Point2::new(0.0, half_w + self.ledge),
        ];
        let lines = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)];

        ProfileOutline::mirrored(quadrant, &lines, &[], Symmetry::Full)
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
        ExtrusionPlan {
            join,
            cut,
            addition: None,
        }
    }
}
