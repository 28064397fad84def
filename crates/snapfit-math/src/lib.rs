#![warn(missing_docs)]

//! Math types for snap-fit profile generation.
//!
//! Thin wrappers around nalgebra providing the planar types used by the
//! profile engine: sketch points, vectors, placement offsets, point-list
//! mirroring and tolerance constants.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Rotation2, Vector2, Vector3};
use thiserror::Error;

/// A point in the local 2D sketch plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the local 2D sketch plane.
pub type Vec2 = Vector2<f64>;

/// A vector in 3D space (used for placement offsets).
pub type Vec3 = Vector3<f64>;

/// Axis selector for [`mirror_points`].
///
/// Mirroring across [`MirrorAxis::X`] negates the x coordinate of every
/// point; mirroring across [`MirrorAxis::Y`] negates the y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorAxis {
    /// Negate x.
    X,
    /// Negate y.
    Y,
}

impl MirrorAxis {
    /// The lowercase axis name (`"x"` or `"y"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorAxis::X => "x",
            MirrorAxis::Y => "y",
        }
    }
}

impl fmt::Display for MirrorAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mirror axis name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mirror axis {0:?}, expected \"x\" or \"y\"")]
pub struct ParseAxisError(pub String);

impl FromStr for MirrorAxis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(MirrorAxis::X),
            "y" => Ok(MirrorAxis::Y),
            other => Err(ParseAxisError(other.to_string())),
        }
    }
}

/// Mirror every point of `points` across `axis`, preserving order.
///
/// Output index `i` is the mirror image of input index `i`; quadrant
/// connectivity built on top of this relies on that ordering.
pub fn mirror_points(points: &[Point2], axis: MirrorAxis) -> Vec<Point2> {
    points
        .iter()
        .map(|p| match axis {
            MirrorAxis::X => Point2::new(-p.x, p.y),
            MirrorAxis::Y => Point2::new(p.x, -p.y),
        })
        .collect()
}

/// Rotate `point` about `center` by `angle` radians (counter-clockwise positive).
pub fn rotate_about(point: &Point2, center: &Point2, angle: f64) -> Point2 {
    center + Rotation2::new(angle) * (point - center)
}

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in sketch units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    fn random_points(rng: &mut StdRng, len: usize) -> Vec<Point2> {
        (0..len)
            .map(|_| {
                Point2::new(
                    rng.random_range(-100.0..100.0),
                    rng.random_range(-100.0..100.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_mirror_x_negates_x() {
        let pts = vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 0.5)];
        let m = mirror_points(&pts, MirrorAxis::X);
        assert_eq!(m, vec![Point2::new(-1.0, 2.0), Point2::new(3.0, 0.5)]);
    }

    #[test]
    fn test_mirror_y_negates_y() {
        let pts = vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 0.5)];
        let m = mirror_points(&pts, MirrorAxis::Y);
        assert_eq!(m, vec![Point2::new(1.0, -2.0), Point2::new(-3.0, -0.5)]);
    }

    #[test]
    fn test_mirror_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in 0..64 {
            let pts = random_points(&mut rng, len);
            for axis in [MirrorAxis::X, MirrorAxis::Y] {
                let back = mirror_points(&mirror_points(&pts, axis), axis);
                assert_eq!(back, pts, "axis {axis}, len {len}");
            }
        }
    }

    #[test]
    fn test_mirror_empty() {
        assert!(mirror_points(&[], MirrorAxis::X).is_empty());
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("x".parse::<MirrorAxis>(), Ok(MirrorAxis::X));
        assert_eq!("y".parse::<MirrorAxis>(), Ok(MirrorAxis::Y));
        assert!("z".parse::<MirrorAxis>().is_err());
        assert_eq!(MirrorAxis::Y.to_string(), "y");
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let center = Point2::new(1.0, 1.0);
        let p = Point2::new(2.0, 1.0);
        let r = rotate_about(&p, &center, PI / 2.0);
        assert!((r.x - 1.0).abs() < 1e-12);
        assert!((r.y - 2.0).abs() < 1e-12);

        let back = rotate_about(&r, &center, -PI / 2.0);
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.48000000000000004, 4), 0.48);
        assert_eq!(round_to(2.71828, 3), 2.718);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + 1e-12, 2.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point2::new(1.001, 2.0);
        assert!(!tol.points_equal(&a, &c));
        assert!(tol.is_zero(-1e-12));
    }
}
