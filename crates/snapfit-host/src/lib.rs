#![warn(missing_docs)]

//! Host-side building of snapfit features.
//!
//! A CAD host implements [`HostAdapter`] (components, sketches, extrusions,
//! boolean operations, joints) and [`SketchSink`]. [`build`] computes the
//! geometry of a feature and replays it through the adapter;
//! [`BuildSession`] wraps that for an interactive command, skipping previews
//! whose input has not changed and gating commits on
//! [`BuildSession::is_valid`].
//!
//! # Example
//!
//! ```
//! use snapfit_geometry::{FeatureVariant, Location};
//! use snapfit_host::{draw_outline, BuildSession, HostResult, SketchSink};
//! use snapfit_math::Point2;
//!
//! #[derive(Default)]
//! struct Counter {
//!     points: usize,
//!     curves: usize,
//! }
//!
//! impl SketchSink for Counter {
//!     type Point = usize;
//!     fn add_point(&mut self, _at: Point2) -> HostResult<usize> {
//!         self.points += 1;
//!         Ok(self.points - 1)
//!     }
//!     fn add_line(&mut self, _a: usize, _b: usize) -> HostResult<()> {
//!         self.curves += 1;
//!         Ok(())
//!     }
//!     fn add_arc(&mut self, _c: usize, _s: usize, _sweep: f64) -> HostResult<()> {
//!         self.curves += 1;
//!         Ok(())
//!     }
//! }
//!
//! let variant = FeatureVariant::Cantilever;
//! let params = variant.default_parameters(Location::Middle, Location::Top);
//! assert!(BuildSession::is_valid(variant, &params));
//!
//! let geometry = variant.build(&params).unwrap();
//! let mut sketch = Counter::default();
//! draw_outline(&mut sketch, &geometry.join.outline).unwrap();
//! assert_eq!(sketch.points, geometry.join.outline.len());
//! ```

pub mod adapter;
pub mod error;
pub mod session;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use adapter::{HostAdapter, SketchSink};
pub use error::{HostError, HostResult};
pub use session::BuildSession;
pub use workflow::{
    build, build_feature, draw_outline, BuildTargets, BuiltFeature, PLACEMENT_ANGLE,
};
