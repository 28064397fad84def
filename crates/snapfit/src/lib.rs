#![warn(missing_docs)]

//! Parametric snap-fit joints for 3D-printed parts.
//!
//! Facade over the snapfit crates: parameter schemas, outline generation for
//! the cantilever, cantilever-pin and pin families, the named preset library
//! and host-side building.
//!
//! # Example
//!
//! ```
//! use snapfit::{FeatureVariant, Location, ProfileLibrary, Tolerance};
//!
//! let library = ProfileLibrary::fallback(FeatureVariant::CantileverPin);
//! let params = library
//!     .resolve(None, None, Location::Middle, Location::Middle)
//!     .unwrap();
//! let geometry = snapfit::build(FeatureVariant::CantileverPin, &params).unwrap();
//!
//! geometry.join.outline.check_closed_loop(&Tolerance::DEFAULT).unwrap();
//! assert!(geometry.addition.is_none());
//! ```

pub use snapfit_geometry;
pub use snapfit_host;
pub use snapfit_library;
pub use snapfit_math;
pub use snapfit_params;
pub use snapfit_profile;

pub use snapfit_geometry::{
    build, validate_ranges, BodyPlan, Extrusion, FeatureGeometry, FeatureVariant, Location,
    SnapError,
};
pub use snapfit_host::{
    BuildSession, BuildTargets, BuiltFeature, HostAdapter, HostError, SketchSink,
};
pub use snapfit_library::{LibraryError, ProfileDocument, ProfileLibrary};
pub use snapfit_math::{Point2, Tolerance, Vec3};
pub use snapfit_params::{ParamValue, ParameterSchema, ParameterSet, RangeViolation};
pub use snapfit_profile::{ArcSegment, ProfileError, ProfileOutline};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fallback_library_builds() {
        let tol = Tolerance::DEFAULT;
        for variant in FeatureVariant::ALL {
            let library = ProfileLibrary::fallback(variant);
            let params = library
                .resolve(None, None, Location::Top, Location::Bottom)
                .unwrap();
            assert!(BuildSession::is_valid(variant, &params), "{variant}");

            let geometry = build(variant, &params).unwrap();
            geometry.join.outline.check_closed_loop(&tol).unwrap();
            geometry.cut.outline.check_closed_loop(&tol).unwrap();
            assert_eq!(geometry.addition.is_some(), variant.has_addition());
        }
    }

    #[test]
    fn test_saved_preset_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cantilever.json");

        let variant = FeatureVariant::Cantilever;
        let mut library = ProfileLibrary::fallback(variant);
        let thick = variant.default_geometry().with("thickness", 0.35);
        library.create_profile("thick", &thick).unwrap();
        library.save(&path).unwrap();

        let reloaded = ProfileLibrary::load(&path, variant).unwrap();
        let params = reloaded
            .resolve(Some("thick"), None, Location::Middle, Location::Middle)
            .unwrap();
        assert_eq!(params.number("thickness").unwrap(), 0.35);
        assert!(build(variant, &params).is_ok());
    }
}
