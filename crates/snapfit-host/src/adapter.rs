//! The interface a CAD host implements to receive snap geometry.
//!
//! Handles (components, sketches, bodies, joint origins) are opaque to this
//! crate; the host picks their types. Every call may fail with
//! [`HostError::Operation`](crate::HostError::Operation).

use snapfit_geometry::Extrusion;
use snapfit_math::{Point2, Vec3};

use crate::error::HostResult;

/// A sketch that accepts points, lines and center/start/sweep arcs.
pub trait SketchSink {
    /// Handle of a placed sketch point.
    type Point: Copy;

    /// Place a sketch point.
    fn add_point(&mut self, at: Point2) -> HostResult<Self::Point>;

    /// Draw a straight line between two placed points.
    fn add_line(&mut self, start: Self::Point, end: Self::Point) -> HostResult<()>;

    /// Draw an arc from `start` sweeping `sweep` radians around `center`.
    fn add_arc(&mut self, center: Self::Point, start: Self::Point, sweep: f64) -> HostResult<()>;
}

/// Solid-modeling operations of a CAD host.
pub trait HostAdapter {
    /// A component that owns sketches, bodies and joint origins.
    type Component;
    /// A sketch on the component's XZ plane.
    type Sketch: SketchSink;
    /// A solid body.
    type Body;
    /// A joint origin (the feature's own or a user-selected target).
    type JointOrigin;

    /// Create a new component named `name` under the active design.
    fn new_component(&mut self, name: &str) -> HostResult<Self::Component>;

    /// Start an empty sketch in `component`.
    fn new_sketch(&mut self, component: &Self::Component) -> HostResult<Self::Sketch>;

    /// Create the feature's joint origin at `offset` from the component origin.
    fn create_joint_origin(
        &mut self,
        component: &Self::Component,
        offset: Vec3,
    ) -> HostResult<Self::JointOrigin>;

    /// Join `origin` to `target`, rotated by `angle` radians about the joint axis.
    fn place(
        &mut self,
        origin: &Self::JointOrigin,
        target: &Self::JointOrigin,
        angle: f64,
    ) -> HostResult<()>;

    /// Extrude the closed profile of `sketch` into a new body.
    fn extrude(
        &mut self,
        component: &Self::Component,
        sketch: &Self::Sketch,
        extrusion: &Extrusion,
        name: &str,
    ) -> HostResult<Self::Body>;

    /// Combine `tool` into `target`, returning the combined body.
    fn combine(&mut self, target: &Self::Body, tool: &Self::Body) -> HostResult<Self::Body>;

    /// Cut `tool` out of `target`. The tool body is kept.
    fn cut(&mut self, target: &Self::Body, tool: &Self::Body) -> HostResult<()>;

    /// Delete a body.
    fn remove_body(&mut self, body: Self::Body) -> HostResult<()>;

    /// Mirror `body` across the component's YZ plane into a new body.
    fn mirror_body(
        &mut self,
        component: &Self::Component,
        body: &Self::Body,
    ) -> HostResult<Self::Body>;
}
