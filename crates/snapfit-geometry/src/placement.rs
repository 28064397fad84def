//! Qualitative placement of a feature relative to its target origin.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snapfit_math::Vec3;
use snapfit_params::ParameterSet;
use tracing::debug;

use crate::error::{Result, SnapError};

/// Accepted values of the `x_location` and `y_location` parameters.
pub const LOCATIONS: &[&str] = &["top", "middle", "bottom"];

/// Where along an axis the feature's origin sits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Far edge.
    Top,
    /// Midpoint.
    #[default]
    Middle,
    /// Near edge.
    Bottom,
}

impl Location {
    /// Parameter spelling of this location.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Top => "top",
            Location::Middle => "middle",
            Location::Bottom => "bottom",
        }
    }

    /// Pick the value belonging to this location.
    pub fn select(&self, top: f64, middle: f64, bottom: f64) -> f64 {
        match self {
            Location::Top => top,
            Location::Middle => middle,
            Location::Bottom => bottom,
        }
    }

    pub(crate) fn read(params: &ParameterSet, key: &str) -> Result<Self> {
        params.text(key)?.parse()
    }
}

/// Origin offset of a feature that is symmetric across its width.
///
/// The join body is pulled back by `gap_extrusion` so the cut body, which
/// starts one gap before the sketch plane, stays centered on it.
pub(crate) fn symmetric_offset(
    x_location: Location,
    y_location: Location,
    extrusion_distance: f64,
    width: f64,
    gap_extrusion: f64,
) -> Vec3 {
    let x = x_location.select(
        extrusion_distance - gap_extrusion,
        extrusion_distance / 2.0 - gap_extrusion,
        -gap_extrusion,
    );
    let y = y_location.select(-width / 2.0, 0.0, width / 2.0);
    debug!(x, y, "symmetric offsets");
    Vec3::new(x, y, 0.0)
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Location::Top),
            "middle" => Ok(Location::Middle),
            "bottom" => Ok(Location::Bottom),
            other => Err(SnapError::UnknownLocation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for name in LOCATIONS {
            let loc: Location = name.parse().unwrap();
            assert_eq!(loc.as_str(), *name);
        }
        assert_eq!(
            "left".parse::<Location>(),
            Err(SnapError::UnknownLocation("left".into()))
        );
    }

    #[test]
    fn test_symmetric_offset() {
        let top = symmetric_offset(Location::Top, Location::Top, 0.9, 0.9, 0.015);
        assert!((top.x - 0.885).abs() < 1e-12);
        assert!((top.y + 0.45).abs() < 1e-12);

        let bottom = symmetric_offset(Location::Bottom, Location::Bottom, 0.9, 0.9, 0.015);
        assert_eq!(bottom, Vec3::new(-0.015, 0.45, 0.0));

        let middle = symmetric_offset(Location::Middle, Location::Middle, 0.9, 0.9, 0.015);
        assert!((middle.x - 0.435).abs() < 1e-12);
        assert_eq!(middle.y, 0.0);
    }

    #[test]
    fn test_select() {
        assert_eq!(Location::Top.select(1.0, 2.0, 3.0), 1.0);
        assert_eq!(Location::Middle.select(1.0, 2.0, 3.0), 2.0);
        assert_eq!(Location::Bottom.select(1.0, 2.0, 3.0), 3.0);
    }
}
