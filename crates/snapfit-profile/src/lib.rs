#![warn(missing_docs)]

//! 2D profile outlines for snap-fit features.
//!
//! An outline is an ordered list of sketch points plus straight lines and
//! center/start/sweep arcs that refer to those points by index. Symmetric
//! features are built from one quadrant by mirroring; the quadrant's
//! connectivity is replicated with a fixed index shift per point block.
//!
//! # Example
//!
//! ```
//! use snapfit_math::{Point2, Tolerance};
//! use snapfit_profile::ProfileOutline;
//!
//! let square = ProfileOutline::new(
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(1.0, 0.0),
//!         Point2::new(1.0, 1.0),
//!         Point2::new(0.0, 1.0),
//!     ],
//!     vec![(0, 1), (1, 2), (2, 3), (3, 0)],
//!     vec![],
//! )
//! .unwrap();
//! assert!(square.check_closed_loop(&Tolerance::DEFAULT).is_ok());
//! ```

mod outline;

pub use outline::{ArcSegment, ProfileOutline, Symmetry};

use thiserror::Error;

/// Errors from outline construction and loop checking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// The outline has no points.
    #[error("profile has no points")]
    EmptyProfile,

    /// A line or arc refers to a point that does not exist.
    #[error("point index {index} out of range for {len} points")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of points in the outline.
        len: usize,
    },

    /// A computed coordinate is NaN or infinite.
    #[error("point {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),

    /// An arc sweep angle is NaN or infinite.
    #[error("arc {0} has a non-finite sweep angle")]
    NonFiniteSweep(usize),

    /// A vertex of the connectivity graph is not shared by exactly two edges.
    #[error("point {point} has {degree} incident edges, expected 2")]
    BadDegree {
        /// Index of the first point welded into the vertex.
        point: usize,
        /// Number of incident edges.
        degree: usize,
    },

    /// The edges form more than one loop.
    #[error("outline splits into {0} separate loops")]
    MultipleLoops(usize),
}
