//! The snap families and the build pipeline that dispatches over them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snapfit_math::Vec3;
use snapfit_params::{ParameterSchema, ParameterSet};
use snapfit_profile::ProfileOutline;
use tracing::{debug, info};

use crate::cantilever::{self, Cantilever};
use crate::cantilever_pin::{self, CantileverPin};
use crate::error::{Result, SnapError};
use crate::extrusion::{BodyPlan, FeatureGeometry};
use crate::pin::{self, Pin};
use crate::placement::Location;
use crate::scaling;
use crate::shape::SnapShape;

/// A named snap geometry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureVariant {
    /// Single filleted arm.
    Cantilever,
    /// Two opposing filleted arms around a slot.
    CantileverPin,
    /// Pre-strained pin with mirrored support bodies.
    Pin,
}

impl FeatureVariant {
    /// Every family, in a stable order.
    pub const ALL: [FeatureVariant; 3] = [
        FeatureVariant::Cantilever,
        FeatureVariant::CantileverPin,
        FeatureVariant::Pin,
    ];

    /// Family name, as used in schemas and library files.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureVariant::Cantilever => "cantilever",
            FeatureVariant::CantileverPin => "cantilever_pin",
            FeatureVariant::Pin => "pin",
        }
    }

    /// The declared parameter keys of this family.
    pub fn schema(&self) -> ParameterSchema {
        match self {
            FeatureVariant::Cantilever => cantilever::SCHEMA,
            FeatureVariant::CantileverPin => cantilever_pin::SCHEMA,
            FeatureVariant::Pin => pin::SCHEMA,
        }
    }

    /// Whether the family produces support bodies.
    pub fn has_addition(&self) -> bool {
        matches!(self, FeatureVariant::Pin)
    }

    /// Check `params` against this family's schema.
    pub fn validate(&self, params: &ParameterSet) -> Result<()> {
        self.schema().validate(params)?;
        Ok(())
    }

    /// Schema-check `params` and read them into the family's typed form.
    pub fn shape(&self, params: &ParameterSet) -> Result<Box<dyn SnapShape>> {
        self.validate(params)?;
        Ok(match self {
            FeatureVariant::Cantilever => Box::new(Cantilever::from_params(params)?),
            FeatureVariant::CantileverPin => Box::new(CantileverPin::from_params(params)?),
            FeatureVariant::Pin => Box::new(Pin::from_params(params)?),
        })
    }

    /// Schema check followed by the family's range rules.
    pub fn validate_ranges(&self, params: &ParameterSet) -> Result<()> {
        self.shape(params)?.validate_ranges()?;
        Ok(())
    }

    fn checked(&self, params: &ParameterSet) -> Result<Box<dyn SnapShape>> {
        let shape = self.shape(params)?;
        shape.validate_ranges()?;
        Ok(shape)
    }

    /// Validated outline of the snap body.
    pub fn join_profile(&self, params: &ParameterSet) -> Result<ProfileOutline> {
        Ok(self.checked(params)?.join_profile()?)
    }

    /// Validated outline of the clearance body.
    pub fn cut_profile(&self, params: &ParameterSet) -> Result<ProfileOutline> {
        Ok(self.checked(params)?.cut_profile()?)
    }

    /// Validated outline of the support body, for families that have one.
    pub fn addition_profile(&self, params: &ParameterSet) -> Result<Option<ProfileOutline>> {
        Ok(self.checked(params)?.addition_profile()?)
    }

    /// Placement offset of the feature's local origin.
    pub fn offset(&self, params: &ParameterSet) -> Result<Vec3> {
        Ok(self.checked(params)?.offset())
    }

    /// Size-derived parameters of this family (a partial set).
    pub fn derive_parameters(&self, size: f64, ratio: f64) -> ParameterSet {
        match self {
            FeatureVariant::Cantilever => scaling::cantilever_size_parameters(size, ratio),
            FeatureVariant::CantileverPin => scaling::cantilever_pin_size_parameters(size, ratio),
            FeatureVariant::Pin => scaling::pin_size_parameters(size, ratio),
        }
    }

    /// The stock geometry preset.
    pub fn default_geometry(&self) -> ParameterSet {
        match self {
            FeatureVariant::Cantilever => cantilever::default_geometry(),
            FeatureVariant::CantileverPin => cantilever_pin::default_geometry(),
            FeatureVariant::Pin => pin::default_geometry(),
        }
    }

    /// The stock gap preset.
    pub fn default_gaps(&self) -> ParameterSet {
        match self {
            FeatureVariant::Cantilever => cantilever::default_gaps(),
            FeatureVariant::CantileverPin => cantilever_pin::default_gaps(),
            FeatureVariant::Pin => pin::default_gaps(),
        }
    }

    /// A complete parameter set: both presets plus placement.
    pub fn default_parameters(&self, x_location: Location, y_location: Location) -> ParameterSet {
        self.default_geometry()
            .merged(&self.default_gaps())
            .with("x_location", x_location.as_str())
            .with("y_location", y_location.as_str())
    }

    /// Run the whole pipeline: schema, ranges, outlines, extrusions, offset.
    pub fn build(&self, params: &ParameterSet) -> Result<FeatureGeometry> {
        let shape = self.checked(params)?;
        let plan = shape.extrusions();

        let join = shape.join_profile()?;
        let cut = shape.cut_profile()?;
        let addition = match (shape.addition_profile()?, plan.addition) {
            (Some(outline), Some(extrusion)) => Some(BodyPlan { outline, extrusion }),
            _ => None,
        };
        debug!(
            join_points = join.len(),
            cut_points = cut.len(),
            addition = addition.is_some(),
            "outlines generated"
        );

        let geometry = FeatureGeometry {
            variant: *self,
            join: BodyPlan {
                outline: join,
                extrusion: plan.join,
            },
            cut: BodyPlan {
                outline: cut,
                extrusion: plan.cut,
            },
            addition,
            offset: shape.offset(),
        };
        info!(variant = self.name(), "built snap geometry");
        Ok(geometry)
    }
}

impl fmt::Display for FeatureVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureVariant {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        FeatureVariant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| SnapError::UnknownVariant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use snapfit_math::{Point2, Tolerance};
    use snapfit_params::{FieldGroup, ValidationError};

    fn defaults(variant: FeatureVariant) -> ParameterSet {
        variant.default_parameters(Location::Middle, Location::Top)
    }

    #[test]
    fn test_names_round_trip() {
        for variant in FeatureVariant::ALL {
            assert_eq!(variant.name().parse::<FeatureVariant>().unwrap(), variant);
            assert_eq!(variant.schema().name(), variant.name());
        }
        assert!(matches!(
            "hook".parse::<FeatureVariant>(),
            Err(SnapError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_schema_conformance() {
        for variant in FeatureVariant::ALL {
            let valid = defaults(variant);
            assert!(variant.validate(&valid).is_ok(), "{variant}");

            for key in valid.keys() {
                let mut missing = valid.clone();
                missing.remove(key);
                assert!(matches!(
                    variant.validate(&missing),
                    Err(SnapError::Validation(ValidationError::SchemaMismatch { .. }))
                ));

                let retyped = match valid.get(key).and_then(|v| v.as_number()) {
                    Some(_) => valid.clone().with(key, "middle"),
                    None => valid.clone().with(key, 1.0),
                };
                assert!(matches!(
                    variant.validate(&retyped),
                    Err(SnapError::Validation(ValidationError::TypeMismatch { .. }))
                ));
            }

            let extra = valid.clone().with("colour", 1.0);
            assert!(matches!(
                variant.validate(&extra),
                Err(SnapError::Validation(ValidationError::SchemaMismatch { .. }))
            ));
        }
    }

    #[test]
    fn test_presets_match_groups() {
        for variant in FeatureVariant::ALL {
            let schema = variant.schema();
            assert!(schema
                .validate_group(FieldGroup::Geometry, &variant.default_geometry())
                .is_ok());
            assert!(schema
                .validate_group(FieldGroup::Gap, &variant.default_gaps())
                .is_ok());
        }
    }

    #[test]
    fn test_defaults_validate_ranges() {
        for variant in FeatureVariant::ALL {
            assert!(variant.validate_ranges(&defaults(variant)).is_ok(), "{variant}");
        }
    }

    #[test]
    fn test_range_violation_is_recoverable() {
        let params = defaults(FeatureVariant::Cantilever).with("length", 0.47);
        let err = FeatureVariant::Cantilever.validate_ranges(&params).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(err, SnapError::Range(ref v) if v.rule == "length_min"));

        let ok = defaults(FeatureVariant::Cantilever).with("length", 0.48);
        assert!(FeatureVariant::Cantilever.validate_ranges(&ok).is_ok());
    }

    #[test]
    fn test_profiles_refuse_invalid_ranges() {
        let params = defaults(FeatureVariant::CantileverPin).with("thickness", 0.0);
        assert!(matches!(
            FeatureVariant::CantileverPin.join_profile(&params),
            Err(SnapError::Range(_))
        ));
    }

    #[test]
    fn test_unknown_location_rejected_by_schema() {
        let params = defaults(FeatureVariant::Pin).with("x_location", "left");
        assert!(matches!(
            FeatureVariant::Pin.build(&params),
            Err(SnapError::Validation(ValidationError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_every_outline_is_one_loop() {
        let tol = Tolerance::DEFAULT;
        for variant in FeatureVariant::ALL {
            let geometry = variant.build(&defaults(variant)).unwrap();
            assert!(geometry.join.outline.check_closed_loop(&tol).is_ok());
            assert!(geometry.cut.outline.check_closed_loop(&tol).is_ok());
            assert!(geometry.cut.outline.is_line_only());
            assert_eq!(geometry.addition.is_some(), variant.has_addition());
            if let Some(addition) = &geometry.addition {
                assert!(addition.outline.check_closed_loop(&tol).is_ok());
            }
        }
    }

    #[test]
    fn test_default_cantilever_end_to_end() {
        let geometry = FeatureVariant::Cantilever
            .build(&defaults(FeatureVariant::Cantilever))
            .unwrap();
        let join = &geometry.join.outline;
        assert_eq!(join.len(), 12);
        assert_eq!(join.lines().len(), 8);
        assert_eq!(join.arcs().len(), 2);
        assert_eq!(join.point(0), Some(Point2::new(0.0, 0.0)));
        assert_eq!(join.lines().last(), Some(&(11, 0)));
        assert_eq!(geometry.variant, FeatureVariant::Cantilever);
        assert_relative_eq!(geometry.offset.x, 0.3);
    }

    #[test]
    fn test_size_sweep_stays_valid() {
        let tol = Tolerance::DEFAULT;
        for variant in FeatureVariant::ALL {
            for step in 10..=300 {
                let size = f64::from(step) / 100.0;
                let derived = variant.derive_parameters(size, scaling::DEFAULT_ASPECT_RATIO);
                let params = defaults(variant).merged(&derived);
                if let Err(err) = variant.validate_ranges(&params) {
                    panic!("{variant} at size {size}: {err}");
                }
                if step % 10 == 0 {
                    let geometry = variant.build(&params).unwrap();
                    assert!(geometry.join.outline.check_closed_loop(&tol).is_ok());
                    assert!(geometry.cut.outline.check_closed_loop(&tol).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FeatureVariant::CantileverPin).unwrap();
        assert_eq!(json, "\"cantilever_pin\"");
    }
}
