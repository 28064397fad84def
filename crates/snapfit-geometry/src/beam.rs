//! Beam-deflection model shared by every snap variant.

/// Empirical factor of the cantilever deflection approximation.
pub const DEFLECTION_FACTOR: f64 = 1.09;

/// Nose height of a snap arm: `1.09 * strain * length² / thickness`.
pub fn nose_height(strain: f64, length: f64, thickness: f64) -> f64 {
    DEFLECTION_FACTOR * strain * length.powi(2) / thickness
}

/// Horizontal run of a nose of `height` with the given nose angle (radians).
pub fn nose_run(height: f64, angle: f64) -> f64 {
    height / angle.tan()
}

/// The nose of an arm: its height and the horizontal run of its ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nose {
    /// Deflection height.
    pub height: f64,
    /// Horizontal run of the angled face.
    pub run: f64,
}

impl Nose {
    /// Nose of an arm of `length` and `thickness` sized for `strain`.
    pub fn new(strain: f64, length: f64, thickness: f64, angle: f64) -> Self {
        let height = nose_height(strain, length, thickness);
        Self {
            height,
            run: nose_run(height, angle),
        }
    }
}

/// Where a root fillet of a given radius departs the arm.
///
/// The sweep angle `atan(length / (thickness / 2))` is the angle between the
/// arm's central axis and the vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Sweep angle of the fillet arc in radians.
    pub angle: f64,
    /// Horizontal extent of the fillet.
    pub dx: f64,
    /// Vertical extent of the fillet.
    pub dy: f64,
}

impl Blend {
    /// Fillet of `radius` at the root of an arm of `length` and `thickness`.
    pub fn new(length: f64, thickness: f64, radius: f64) -> Self {
        let angle = (length / (thickness / 2.0)).atan();
        let (sin, cos) = angle.sin_cos();
        Self {
            angle,
            dx: (1.0 - cos) * radius,
            dy: sin * radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nose_height_formula() {
        let h = nose_height(0.04, 12.0, 4.0);
        assert_relative_eq!(h, 1.09 * 0.04 * 144.0 / 4.0, epsilon = 1e-12);
        assert_relative_eq!(h, 1.5696, epsilon = 1e-12);
    }

    #[test]
    fn test_nose_height_monotonic() {
        let mut last = 0.0;
        for i in 0..50 {
            let strain = f64::from(i) * 0.002;
            let h = nose_height(strain, 12.0, 4.0);
            assert!(h >= last);
            last = h;
        }

        let mut last = 0.0;
        for i in 0..50 {
            let length = f64::from(i) * 0.5;
            let h = nose_height(0.04, length, 4.0);
            assert!(h >= last);
            last = h;
        }
    }

    #[test]
    fn test_nose_run_at_45_degrees() {
        let run = nose_run(2.0, 45f64.to_radians());
        assert_relative_eq!(run, 2.0, epsilon = 1e-12);

        let nose = Nose::new(0.04, 12.0, 4.0, 45f64.to_radians());
        assert_relative_eq!(nose.run, nose.height, epsilon = 1e-12);
    }

    #[test]
    fn test_blend_extents() {
        let blend = Blend::new(1.2, 0.3, 0.1);
        assert_relative_eq!(blend.angle, (1.2f64 / 0.15).atan(), epsilon = 1e-12);
        assert_relative_eq!(blend.dx, (1.0 - blend.angle.cos()) * 0.1, epsilon = 1e-12);
        assert_relative_eq!(blend.dy, blend.angle.sin() * 0.1, epsilon = 1e-12);

        let none = Blend::new(1.2, 0.3, 0.0);
        assert_eq!(none.dx, 0.0);
        assert_eq!(none.dy, 0.0);
    }
}
