//! Index-addressed profile outlines.

use serde::{Deserialize, Serialize};
use snapfit_math::{mirror_points, rotate_about, MirrorAxis, Point2, Tolerance};

use crate::ProfileError;

/// A circular arc defined by point indices and a signed sweep.
///
/// The arc starts at `points[start]` and sweeps `sweep` radians
/// (counter-clockwise positive) around `points[center]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    /// Index of the center point.
    pub center: usize,
    /// Index of the start point.
    pub start: usize,
    /// Signed sweep angle in radians.
    pub sweep: f64,
}

impl ArcSegment {
    /// Create an arc.
    pub fn new(center: usize, start: usize, sweep: f64) -> Self {
        Self {
            center,
            start,
            sweep,
        }
    }

    fn shifted(&self, offset: usize, flip: bool) -> Self {
        Self {
            center: self.center + offset,
            start: self.start + offset,
            sweep: if flip { -self.sweep } else { self.sweep },
        }
    }
}

/// How a quadrant is mirrored into a full outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// Quadrant followed by its mirror across the x axis (y negated): two blocks.
    Half,
    /// `Half`, followed by the mirror of both blocks across the y axis
    /// (x negated): four blocks in the order Q, Q_y, Q_x, Q_yx.
    Full,
}

impl Symmetry {
    /// Number of point blocks the quadrant expands into.
    pub fn blocks(&self) -> usize {
        match self {
            Symmetry::Half => 2,
            Symmetry::Full => 4,
        }
    }
}

/// A 2D outline: points addressed by insertion index, plus lines and arcs.
///
/// Every index referenced by a line or an arc is valid and every coordinate
/// is finite; both are checked on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileOutline {
    points: Vec<Point2>,
    lines: Vec<(usize, usize)>,
    arcs: Vec<ArcSegment>,
}

impl ProfileOutline {
    /// Create an outline.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no points
    /// - A line or arc refers to a missing point
    /// - A coordinate or sweep angle is NaN or infinite
    pub fn new(
        points: Vec<Point2>,
        lines: Vec<(usize, usize)>,
        arcs: Vec<ArcSegment>,
    ) -> Result<Self, ProfileError> {
        if points.is_empty() {
            return Err(ProfileError::EmptyProfile);
        }

        let len = points.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(ProfileError::IndexOutOfRange { index, len })
            }
        };
        for &(a, b) in &lines {
            check(a)?;
            check(b)?;
        }
        for arc in &arcs {
            check(arc.center)?;
            check(arc.start)?;
        }

        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ProfileError::NonFiniteCoordinate(i));
        }
        if let Some(i) = arcs.iter().position(|a| !a.sweep.is_finite()) {
            return Err(ProfileError::NonFiniteSweep(i));
        }

        Ok(Self {
            points,
            lines,
            arcs,
        })
    }

    /// A closed polygon through `points` in order.
    pub fn polygon(points: Vec<Point2>) -> Result<Self, ProfileError> {
        let n = points.len();
        let lines = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Self::new(points, lines, Vec::new())
    }

    /// Expand one quadrant into a symmetric outline.
    ///
    /// Point blocks are concatenated in mirror order (see [`Symmetry`]).
    /// Quadrant lines are kept, then each one is repeated for every further
    /// block with its indices shifted by `quadrant.len() * block`. Arcs are
    /// repeated block by block; mirroring reverses orientation, so the sweep
    /// sign flips on blocks mirrored an odd number of times.
    pub fn mirrored(
        quadrant: Vec<Point2>,
        lines: &[(usize, usize)],
        arcs: &[ArcSegment],
        symmetry: Symmetry,
    ) -> Result<Self, ProfileError> {
        let n = quadrant.len();
        let blocks = symmetry.blocks();

        let mut points = quadrant;
        let flipped = mirror_points(&points, MirrorAxis::Y);
        points.extend(flipped);
        if symmetry == Symmetry::Full {
            let flipped = mirror_points(&points, MirrorAxis::X);
            points.extend(flipped);
        }

        let mut all_lines = lines.to_vec();
        for &(a, b) in lines {
            for block in 1..blocks {
                all_lines.push((a + n * block, b + n * block));
            }
        }

        let mut all_arcs = Vec::with_capacity(arcs.len() * blocks);
        for block in 0..blocks {
            let flip = (block % 2 == 1) != (block >= 2);
            all_arcs.extend(arcs.iter().map(|a| a.shifted(n * block, flip)));
        }

        Self::new(points, all_lines, all_arcs)
    }

    /// All points in index order.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Straight connections as point-index pairs.
    pub fn lines(&self) -> &[(usize, usize)] {
        &self.lines
    }

    /// Arc connections.
    pub fn arcs(&self) -> &[ArcSegment] {
        &self.arcs
    }

    /// Point at `index`.
    pub fn point(&self, index: usize) -> Option<Point2> {
        self.points.get(index).copied()
    }

    /// Where `arc` ends: its start point rotated about its center by its sweep.
    pub fn arc_end(&self, arc: &ArcSegment) -> Point2 {
        rotate_about(
            &self.points[arc.start],
            &self.points[arc.center],
            arc.sweep,
        )
    }

    /// Check if all connections are straight lines.
    pub fn is_line_only(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the outline has no points. Always false for a constructed outline.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check that lines and arcs trace exactly one closed loop.
    ///
    /// Points closer than `tol.linear` are welded into one vertex (mirrored
    /// quadrants meet at coincident points, and some outlines carry duplicate
    /// points); connections that collapse to a single vertex are ignored. Arc
    /// end points are resolved geometrically. Every vertex touched by a
    /// connection must then have degree two, and the connections must form a
    /// single cycle. Points used by nothing (arc centers, construction
    /// points) are not part of the graph.
    pub fn check_closed_loop(&self, tol: &Tolerance) -> Result<(), ProfileError> {
        let mut welder = Welder::new(*tol);
        let mut edges = Vec::with_capacity(self.lines.len() + self.arcs.len());

        for &(a, b) in &self.lines {
            let va = welder.vertex(self.points[a], a);
            let vb = welder.vertex(self.points[b], b);
            if va != vb {
                edges.push((va, vb));
            }
        }
        for arc in &self.arcs {
            let vs = welder.vertex(self.points[arc.start], arc.start);
            let ve = welder.vertex(self.arc_end(arc), arc.start);
            if vs != ve {
                edges.push((vs, ve));
            }
        }

        if edges.is_empty() {
            return Err(ProfileError::EmptyProfile);
        }

        let count = welder.len();
        let mut degree = vec![0usize; count];
        for &(a, b) in &edges {
            degree[a] += 1;
            degree[b] += 1;
        }
        if let Some(v) = (0..count).find(|&v| degree[v] != 0 && degree[v] != 2) {
            return Err(ProfileError::BadDegree {
                point: welder.origin(v),
                degree: degree[v],
            });
        }

        let mut parent: Vec<usize> = (0..count).collect();
        for &(a, b) in &edges {
            let ra = find(&mut parent, a);
            let rb = find(&mut parent, b);
            parent[ra] = rb;
        }
        let loops = (0..count)
            .filter(|&v| degree[v] > 0 && find(&mut parent, v) == v)
            .count();
        if loops != 1 {
            return Err(ProfileError::MultipleLoops(loops));
        }
        Ok(())
    }
}

fn find(parent: &mut [usize], mut v: usize) -> usize {
    while parent[v] != v {
        parent[v] = parent[parent[v]];
        v = parent[v];
    }
    v
}

/// Merges coincident points into graph vertices.
struct Welder {
    tol: Tolerance,
    vertices: Vec<(Point2, usize)>,
}

impl Welder {
    fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            vertices: Vec::new(),
        }
    }

    fn vertex(&mut self, p: Point2, origin: usize) -> usize {
        if let Some(i) = self
            .vertices
            .iter()
            .position(|(q, _)| self.tol.points_equal(&p, q))
        {
            return i;
        }
        self.vertices.push((p, origin));
        self.vertices.len() - 1
    }

    fn origin(&self, vertex: usize) -> usize {
        self.vertices[vertex].1
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tol() -> Tolerance {
        Tolerance::DEFAULT
    }

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_polygon_closes() {
        let outline = ProfileOutline::polygon(unit_square()).unwrap();
        assert_eq!(outline.lines(), &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(outline.is_line_only());
        assert!(outline.check_closed_loop(&tol()).is_ok());
    }

    #[test]
    fn test_empty_profile_error() {
        let result = ProfileOutline::new(vec![], vec![], vec![]);
        assert!(matches!(result, Err(ProfileError::EmptyProfile)));
    }

    #[test]
    fn test_index_out_of_range() {
        let result = ProfileOutline::new(unit_square(), vec![(0, 4)], vec![]);
        assert_eq!(
            result.unwrap_err(),
            ProfileError::IndexOutOfRange { index: 4, len: 4 }
        );

        let result = ProfileOutline::new(unit_square(), vec![], vec![ArcSegment::new(9, 0, 1.0)]);
        assert!(matches!(result, Err(ProfileError::IndexOutOfRange { index: 9, .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut pts = unit_square();
        pts[2].y = f64::INFINITY;
        assert_eq!(
            ProfileOutline::polygon(pts).unwrap_err(),
            ProfileError::NonFiniteCoordinate(2)
        );

        let result = ProfileOutline::new(
            unit_square(),
            vec![],
            vec![ArcSegment::new(0, 1, f64::NAN)],
        );
        assert_eq!(result.unwrap_err(), ProfileError::NonFiniteSweep(0));
    }

    #[test]
    fn test_open_chain_has_bad_degree() {
        let outline = ProfileOutline::new(unit_square(), vec![(0, 1), (1, 2), (2, 3)], vec![]).unwrap();
        assert!(matches!(
            outline.check_closed_loop(&tol()),
            Err(ProfileError::BadDegree { degree: 1, .. })
        ));
    }

    #[test]
    fn test_two_loops_detected() {
        let mut pts = unit_square();
        pts.extend(unit_square().iter().map(|p| Point2::new(p.x + 5.0, p.y)));
        let lines = vec![(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 7), (7, 4)];
        let outline = ProfileOutline::new(pts, lines, vec![]).unwrap();
        assert_eq!(
            outline.check_closed_loop(&tol()),
            Err(ProfileError::MultipleLoops(2))
        );
    }

    #[test]
    fn test_duplicate_points_weld() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        let outline = ProfileOutline::new(pts, vec![(0, 1), (1, 2), (2, 3), (3, 0)], vec![]).unwrap();
        assert!(outline.check_closed_loop(&tol()).is_ok());
    }

    #[test]
    fn test_arc_end_and_quarter_disc() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let arc = ArcSegment::new(0, 1, PI / 2.0);
        let outline = ProfileOutline::new(pts, vec![(0, 1), (2, 0)], vec![arc]).unwrap();

        let end = outline.arc_end(&arc);
        assert!(end.x.abs() < 1e-12);
        assert!((end.y - 1.0).abs() < 1e-12);
        assert!(outline.check_closed_loop(&tol()).is_ok());
    }

    #[test]
    fn test_arc_ending_nowhere_leaves_open_vertex() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let outline = ProfileOutline::new(
            pts,
            vec![(0, 1), (2, 0)],
            vec![ArcSegment::new(0, 1, PI / 3.0)],
        )
        .unwrap();
        assert!(matches!(
            outline.check_closed_loop(&tol()),
            Err(ProfileError::BadDegree { .. })
        ));
    }

    #[test]
    fn test_full_mirror_of_rectangle_quadrant() {
        let quadrant = vec![
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let outline =
            ProfileOutline::mirrored(quadrant, &[(0, 1), (1, 2)], &[], Symmetry::Full).unwrap();

        assert_eq!(outline.len(), 12);
        assert_eq!(outline.lines().len(), 8);
        assert_eq!(&outline.lines()[..5], &[(0, 1), (1, 2), (3, 4), (6, 7), (9, 10)]);
        assert_eq!(outline.point(4), Some(Point2::new(2.0, -1.0)));
        assert_eq!(outline.point(7), Some(Point2::new(-2.0, 1.0)));
        assert_eq!(outline.point(10), Some(Point2::new(-2.0, -1.0)));
        assert!(outline.check_closed_loop(&tol()).is_ok());
    }

    #[test]
    fn test_half_mirror_keeps_positive_x() {
        let quadrant = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let outline = ProfileOutline::mirrored(
            quadrant,
            &[(1, 2), (2, 3), (3, 0)],
            &[],
            Symmetry::Half,
        )
        .unwrap();
        assert_eq!(outline.len(), 8);
        assert!(outline.points().iter().all(|p| p.x >= 0.0));
        assert!(outline.check_closed_loop(&tol()).is_ok());
    }

    #[test]
    fn test_mirrored_arc_sweeps_alternate() {
        let quadrant = vec![
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
        ];
        let outline = ProfileOutline::mirrored(
            quadrant,
            &[],
            &[ArcSegment::new(1, 0, -0.5)],
            Symmetry::Full,
        )
        .unwrap();
        let sweeps: Vec<f64> = outline.arcs().iter().map(|a| a.sweep).collect();
        assert_eq!(sweeps, vec![-0.5, 0.5, 0.5, -0.5]);
        let starts: Vec<usize> = outline.arcs().iter().map(|a| a.start).collect();
        assert_eq!(starts, vec![0, 2, 4, 6]);

        // Each mirrored arc ends at the mirror image of the first arc's end.
        let first = outline.arc_end(&outline.arcs()[0]);
        let third = outline.arc_end(&outline.arcs()[2]);
        assert!((third.x + first.x).abs() < 1e-12);
        assert!((third.y - first.y).abs() < 1e-12);
    }

    #[test]
    fn test_serializes_points_and_connectivity() {
        let outline = ProfileOutline::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            vec![],
            vec![ArcSegment::new(0, 1, PI)],
        )
        .unwrap();
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["points"][1], serde_json::json!([1.0, 0.0]));
        assert_eq!(json["arcs"][0]["start"], 1);
        assert_eq!(json["lines"].as_array().map(Vec::len), Some(0));
    }
}
