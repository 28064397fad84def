//! Size-driven parameter presets.
//!
//! Each family derives its geometry from a single overall size so that the
//! parts scale sensibly: radii and gap buffers grow piecewise and saturate
//! instead of scaling linearly. Strain, nose angle (except for the
//! cantilever pin) and all gaps are left to the caller. Every value is
//! rounded to four decimals.

use snapfit_math::round_to;
use snapfit_params::ParameterSet;
use tracing::debug;

/// Length-to-width ratio used when the caller has no preference.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.6;

/// Sizes below this are raised to it by the cantilever families.
pub const MIN_SIZE: f64 = 0.3;

fn rounded(values: &[(&str, f64)]) -> ParameterSet {
    values
        .iter()
        .map(|&(key, value)| (key, round_to(value, 4)))
        .collect()
}

/// Parameters of a cantilever of the given `size`.
pub fn cantilever_size_parameters(size: f64, ratio: f64) -> ParameterSet {
    let size = size.max(MIN_SIZE);
    let (radius, gap_buffer) = if size <= 0.5 {
        (0.05, 0.03)
    } else if size <= 1.0 {
        (0.05 + (size - 0.5) / 10.0, 0.03 + (size - 0.5) / 25.0)
    } else if size <= 1.5 {
        (0.10 + (size - 1.0) / 10.0, 0.05 + 0.06 * (size - 1.0))
    } else {
        (0.15, 0.08)
    };
    debug!(size, radius, gap_buffer, "cantilever size parameters");

    rounded(&[
        ("length", size * ratio),
        ("extrusion_distance", size),
        ("bottom_radius", radius),
        ("top_radius", 1.5 * radius),
        ("thickness", size / 2.0 - radius - gap_buffer),
    ])
}

/// Parameters of a cantilever pin of the given `size` (its width).
pub fn cantilever_pin_size_parameters(size: f64, ratio: f64) -> ParameterSet {
    let size = size.max(MIN_SIZE);
    let (radius, gap_buffer) = if size <= 0.5 {
        (0.05, 0.03)
    } else if size < 1.0 {
        (0.05 + (size - 0.5) / 5.0, 0.03 + (size - 0.5) / 25.0)
    } else {
        (0.15, 0.05)
    };
    debug!(size, radius, gap_buffer, "cantilever pin size parameters");

    let thickness = size / 2.0 - radius - gap_buffer;
    rounded(&[
        ("width", size),
        ("length", size * ratio),
        ("extrusion_distance", size),
        ("inner_radius", radius),
        ("thickness", thickness),
        ("middle_padding", thickness),
        ("ledge", 0.05 + size / 20.0),
        ("nose_angle", 70.0),
    ])
}

/// Parameters of a pin of the given `size` (its width).
pub fn pin_size_parameters(size: f64, ratio: f64) -> ParameterSet {
    let gap_buffer = if size <= 0.0 {
        0.0
    } else if size <= 0.3 {
        size / 10.0
    } else if size <= 1.0 {
        0.03 + (size - 0.3) / 25.0
    } else if size < 1.5 {
        0.05 + 0.06 * (size - 1.0)
    } else {
        0.08
    };
    debug!(size, gap_buffer, "pin size parameters");

    let thickness = size / 2.0 - gap_buffer;
    rounded(&[
        ("width", size),
        ("length", size * ratio),
        ("extrusion_distance", size),
        ("thickness", thickness),
        ("middle_padding", thickness),
        ("ledge", size / 12.0),
        ("wall_thickness", size / 4.0),
        ("gap_buffer", gap_buffer),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(set: &ParameterSet, key: &str) -> f64 {
        set.number(key).unwrap()
    }

    #[test]
    fn test_cantilever_pin_floor() {
        let small = cantilever_pin_size_parameters(0.1, DEFAULT_ASPECT_RATIO);
        assert_eq!(small, cantilever_pin_size_parameters(0.3, DEFAULT_ASPECT_RATIO));
        assert_eq!(num(&small, "width"), 0.3);
        assert_eq!(num(&small, "length"), 0.48);
        assert_eq!(num(&small, "inner_radius"), 0.05);
        assert_eq!(num(&small, "thickness"), 0.07);
    }

    #[test]
    fn test_cantilever_pin_saturates() {
        let unit = cantilever_pin_size_parameters(1.0, DEFAULT_ASPECT_RATIO);
        assert_eq!(num(&unit, "inner_radius"), 0.15);
        assert_eq!(num(&unit, "thickness"), 0.3);
        assert_eq!(num(&unit, "middle_padding"), 0.3);
        assert_eq!(num(&unit, "ledge"), 0.1);
        assert_eq!(num(&unit, "nose_angle"), 70.0);
        assert_eq!(unit.len(), 8);
    }

    #[test]
    fn test_pin_gap_buffer_pieces() {
        let gb = |s: f64| num(&pin_size_parameters(s, DEFAULT_ASPECT_RATIO), "gap_buffer");
        assert_eq!(gb(0.2), 0.02);
        assert_eq!(gb(1.0), 0.058);
        assert_eq!(gb(1.25), 0.065);
        assert_eq!(gb(2.0), 0.08);
    }

    #[test]
    fn test_pin_has_no_floor() {
        let p = pin_size_parameters(0.1, 2.0);
        assert_eq!(num(&p, "width"), 0.1);
        assert_eq!(num(&p, "length"), 0.2);
        assert_eq!(num(&p, "thickness"), 0.04);
        assert_eq!(num(&p, "wall_thickness"), 0.025);
    }

    #[test]
    fn test_cantilever_sizes() {
        let unit = cantilever_size_parameters(1.0, DEFAULT_ASPECT_RATIO);
        assert_eq!(num(&unit, "bottom_radius"), 0.1);
        assert_eq!(num(&unit, "top_radius"), 0.15);
        assert_eq!(num(&unit, "thickness"), 0.35);
        assert_eq!(num(&unit, "length"), 1.6);

        let floor = cantilever_size_parameters(0.0, DEFAULT_ASPECT_RATIO);
        assert_eq!(num(&floor, "length"), 0.48);
        assert_eq!(num(&floor, "thickness"), 0.07);
    }
}
