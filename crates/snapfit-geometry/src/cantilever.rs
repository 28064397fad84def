//! Cantilever snap: one arm with a root fillet and a nosed tip.
//!
//! The arm grows along +x with its thickness along +y. The join outline
//! blends into the wall with a bottom fillet and closes over a top fillet;
//! the cut outline is an all-straight polygon pushed out by the gap values.

use std::f64::consts::FRAC_PI_2;

use snapfit_math::{Point2, Tolerance, Vec3};
use snapfit_params::{FieldGroup, FieldSpec, ParameterSchema, ParameterSet, RangeViolation};
use snapfit_profile::{ArcSegment, ProfileError, ProfileOutline};
use tracing::debug;

use crate::beam::{Blend, Nose};
use crate::error::Result;
use crate::extrusion::{ExtrusionPlan, GapCarrier};
use crate::placement::{Location, LOCATIONS};
use crate::shape::{ensure, SnapShape};

/// Shortest arm the cantilever family supports.
pub const MIN_LENGTH: f64 = 0.48;

/// Smallest nose angle in degrees.
pub const MIN_NOSE_ANGLE: f64 = 20.0;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::number("top_radius", FieldGroup::Geometry),
    FieldSpec::number("bottom_radius", FieldGroup::Geometry),
    FieldSpec::number("thickness", FieldGroup::Geometry),
    FieldSpec::number("length", FieldGroup::Geometry),
    FieldSpec::number("extrusion_distance", FieldGroup::Geometry),
    FieldSpec::number("strain", FieldGroup::Geometry),
    FieldSpec::number("nose_angle", FieldGroup::Geometry),
    FieldSpec::number("gap_length", FieldGroup::Gap),
    FieldSpec::number("gap_thickness", FieldGroup::Gap),
    FieldSpec::number("gap_extrusion", FieldGroup::Gap),
    FieldSpec::number("extra_length", FieldGroup::Gap),
    FieldSpec::choice("x_location", LOCATIONS),
    FieldSpec::choice("y_location", LOCATIONS),
];

/// Schema of the cantilever family.
pub const SCHEMA: ParameterSchema = ParameterSchema::new("cantilever", FIELDS);

/// Stock cantilever dimensions.
pub fn default_geometry() -> ParameterSet {
    ParameterSet::new()
        .with("top_radius", 0.15)
        .with("bottom_radius", 0.1)
        .with("thickness", 0.3)
        .with("length", 1.2)
        .with("extrusion_distance", 0.6)
        .with("strain", 0.02)
        .with("nose_angle", 70.0)
}

/// Stock cantilever clearances.
pub fn default_gaps() -> ParameterSet {
    ParameterSet::new()
        .with("gap_thickness", 0.015)
        .with("gap_length", 0.015)
        .with("gap_extrusion", 0.015)
        .with("extra_length", 0.06)
}

/// Typed cantilever parameters. The nose angle is kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cantilever {
    /// Radius of the fillet closing the top of the arm.
    pub top_radius: f64,
    /// Radius of the fillet at the arm's root.
    pub bottom_radius: f64,
    /// Arm thickness.
    pub thickness: f64,
    /// Arm length.
    pub length: f64,
    /// Extrusion depth of the snap body.
    pub extrusion_distance: f64,
    /// Design strain used to size the nose.
    pub strain: f64,
    /// Nose angle in degrees.
    pub nose_angle: f64,
    /// Clearance along the arm.
    pub gap_length: f64,
    /// Clearance across the arm.
    pub gap_thickness: f64,
    /// Clearance along the extrusion axis.
    pub gap_extrusion: f64,
    /// Extra cut length past the nose.
    pub extra_length: f64,
    /// Placement along the extrusion axis.
    pub x_location: Location,
    /// Placement across the arm.
    pub y_location: Location,
}

impl Cantilever {
    /// Read typed parameters from a set.
    pub fn from_params(params: &ParameterSet) -> Result<Self> {
        Ok(Self {
            top_radius: params.number("top_radius")?,
            bottom_radius: params.number("bottom_radius")?,
            thickness: params.number("thickness")?,
            length: params.number("length")?,
            extrusion_distance: params.number("extrusion_distance")?,
            strain: params.number("strain")?,
            nose_angle: params.number("nose_angle")?,
            gap_length: params.number("gap_length")?,
            gap_thickness: params.number("gap_thickness")?,
            gap_extrusion: params.number("gap_extrusion")?,
            extra_length: params.number("extra_length")?,
            x_location: Location::read(params, "x_location")?,
            y_location: Location::read(params, "y_location")?,
        })
    }

    fn blend(&self) -> Blend {
        Blend::new(self.length, self.thickness, self.bottom_radius)
    }

    fn nose(&self, arm: f64) -> Nose {
        Nose::new(
            self.strain,
            arm,
            self.thickness,
            self.nose_angle.to_radians(),
        )
    }

    /// Whether both fillets are absent, selecting the seven-point outline.
    pub fn is_simple(&self) -> bool {
        let tol = Tolerance::DEFAULT;
        tol.is_zero(self.bottom_radius) && tol.is_zero(self.top_radius)
    }

    fn simple_join_profile(&self) -> std::result::Result<ProfileOutline, ProfileError> {
        let l = self.length;
        let th = self.thickness;
        let nose = self.nose(l);
        let tip = 1.2 * l + nose.run;

        ProfileOutline::polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(tip, 0.625 * th),
            Point2::new(tip, 0.75 * th),
            Point2::new(1.07 * l + nose.run, th + nose.height),
            Point2::new(l + nose.run, th + nose.height),
            Point2::new(l, th),
            Point2::new(0.0, th),
        ])
    }
}

impl SnapShape for Cantilever {
    fn validate_ranges(&self) -> std::result::Result<(), RangeViolation> {
        ensure(self.length >= MIN_LENGTH, "length_min", || {
            format!("length must be at least {MIN_LENGTH}")
        })?;
        ensure(self.top_radius >= 0.0, "top_radius_negative", || {
            "top radius must not be negative".into()
        })?;
        ensure(self.bottom_radius >= 0.0, "bottom_radius_negative", || {
            "bottom radius must not be negative".into()
        })?;
        ensure(self.bottom_radius < self.length, "bottom_radius_length", || {
            "bottom radius must be smaller than the length".into()
        })?;
        ensure(self.top_radius < self.length, "top_radius_length", || {
            "top radius must be smaller than the length".into()
        })?;
        ensure(self.strain >= 0.0, "strain_negative", || {
            "strain must not be negative".into()
        })?;
        ensure(self.thickness > 0.0, "thickness_positive", || {
            "thickness must be positive".into()
        })?;
        ensure(self.extrusion_distance > 0.0, "extrusion_positive", || {
            "extrusion distance must be positive".into()
        })?;
        ensure(self.nose_angle >= MIN_NOSE_ANGLE, "nose_angle_min", || {
            format!("nose angle must be at least {MIN_NOSE_ANGLE} degrees")
        })?;
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
        if self.is_simple() {
            return self.simple_join_profile();
        }

        let l = self.length;
        let th = self.thickness;
        let r_top = self.top_radius;
        let r_bot = self.bottom_radius;
        let blend = self.blend();
        let nose = self.nose(l - blend.dx);
        let tip = 1.2 * l + nose.run;
        let top = blend.dy + th;

        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(r_bot, 0.0),
            Point2::new(blend.dx, blend.dy),
            Point2::new(tip, blend.dy + 0.625 * th),
            Point2::new(tip, blend.dy + 0.75 * th),
            Point2::new(1.07 * l + nose.run, top + nose.height),
            Point2::new(l + nose.run, top + nose.height),
            Point2::new(l + nose.run, top + nose.height),
            Point2::new(l, top),
            Point2::new(r_top, top),
            Point2::new(r_top, top + r_top),
            Point2::new(0.0, top + r_top),
        ];
        let lines = vec![
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (11, 0),
        ];

        // A zero-radius fillet collapses onto its start point.
        let tol = Tolerance::DEFAULT;
        let mut arcs = Vec::with_capacity(2);
        if !tol.is_zero(r_bot) {
            arcs.push(ArcSegment::new(1, 0, -blend.angle));
        }
        if !tol.is_zero(r_top) {
            arcs.push(ArcSegment::new(10, 11, FRAC_PI_2));
        }

        ProfileOutline::new(points, lines, arcs)
    }

    fn cut_profile(&self) -> std::result::Result<ProfileOutline, ProfileError> {
        let l = self.length;
        let th = self.thickness;
        let g_l = self.gap_length;
        let g_h = self.gap_thickness;
        let blend = self.blend();
        let nose = self.nose(l - blend.dx);
        let total = 1.2 * l + nose.run + self.extra_length;
        let floor = blend.dy - g_h;
        let roof = blend.dy + th + g_h;

        ProfileOutline::polygon(vec![
            Point2::new(0.0, -g_h),
            Point2::new(blend.dx, floor),
            Point2::new(total, floor),
            Point2::new(total, roof + nose.height),
            Point2::new(l + nose.run - g_l, roof + nose.height),
            Point2::new(l - g_l, roof),
            Point2::new(self.top_radius, roof),
            Point2::new(0.0, roof + self.top_radius),
        ])
    }

    fn offset(&self) -> Vec3 {
        let ext = self.extrusion_distance;
        let depth = self.blend().dy + self.thickness;
        let x = self.x_location.select(ext, ext / 2.0, 0.0);
        let y = self.y_location.select(-depth, -depth / 2.0, 0.0);
        debug!(x, y, "cantilever offsets");
        Vec3::new(x, y, 0.0)
    }

    fn extrusions(&self) -> ExtrusionPlan {
        let (join, cut) = GapCarrier::CutBody.plan(self.extrusion_distance, self.gap_extrusion);
        ExtrusionPlan {
            join,
            cut,
            addition: None,
        }
    }
}
