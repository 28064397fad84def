//! In-memory host that records every call, for tests.

use snapfit_geometry::Extrusion;
use snapfit_math::{Point2, Vec3};

use crate::adapter::{HostAdapter, SketchSink};
use crate::error::{HostError, HostResult};

#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    Point(Point2),
    Line(usize, usize),
    Arc { center: usize, start: usize, sweep: f64 },
}

#[derive(Debug, Default)]
pub struct RecordingSketch {
    pub events: Vec<SketchEvent>,
    points: usize,
}

impl SketchSink for RecordingSketch {
    type Point = usize;

    fn add_point(&mut self, at: Point2) -> HostResult<usize> {
        self.events.push(SketchEvent::Point(at));
        self.points += 1;
        Ok(self.points - 1)
    }

    fn add_line(&mut self, start: usize, end: usize) -> HostResult<()> {
        self.events.push(SketchEvent::Line(start, end));
        Ok(())
    }

    fn add_arc(&mut self, center: usize, start: usize, sweep: f64) -> HostResult<()> {
        self.events.push(SketchEvent::Arc { center, start, sweep });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Component(String),
    JointOrigin(Vec3),
    Place { origin: usize, target: usize, angle: f64 },
    Extrude { body: usize, name: String, extrusion: Extrusion, points: usize },
    Combine { target: usize, tool: usize, result: usize },
    Cut { target: usize, tool: usize },
    Remove(usize),
    Mirror { source: usize, result: usize },
}

/// Handles are plain counters starting at 1; test targets use ids >= 100.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub ops: Vec<Op>,
    pub fail_on: Option<&'static str>,
    next: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(operation: &'static str) -> Self {
        Self {
            fail_on: Some(operation),
            ..Self::default()
        }
    }

    fn handle(&mut self, operation: &'static str) -> HostResult<usize> {
        if self.fail_on == Some(operation) {
            return Err(HostError::operation(operation, "rejected by test host"));
        }
        self.next += 1;
        Ok(self.next)
    }

    pub fn extrusions(&self) -> Vec<(&str, Extrusion)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Extrude { name, extrusion, .. } => Some((name.as_str(), *extrusion)),
                _ => None,
            })
            .collect()
    }
}

impl HostAdapter for RecordingHost {
    type Component = usize;
    type Sketch = RecordingSketch;
    type Body = usize;
    type JointOrigin = usize;

    fn new_component(&mut self, name: &str) -> HostResult<usize> {
        let id = self.handle("new_component")?;
        self.ops.push(Op::Component(name.to_string()));
        Ok(id)
    }

    fn new_sketch(&mut self, _component: &usize) -> HostResult<RecordingSketch> {
        self.handle("new_sketch")?;
        Ok(RecordingSketch::default())
    }

    fn create_joint_origin(&mut self, _component: &usize, offset: Vec3) -> HostResult<usize> {
        let id = self.handle("create_joint_origin")?;
        self.ops.push(Op::JointOrigin(offset));
        Ok(id)
    }

    fn place(&mut self, origin: &usize, target: &usize, angle: f64) -> HostResult<()> {
        self.handle("place")?;
        self.ops.push(Op::Place {
            origin: *origin,
            target: *target,
            angle,
        });
        Ok(())
    }

    fn extrude(
        &mut self,
        _component: &usize,
        sketch: &RecordingSketch,
        extrusion: &Extrusion,
        name: &str,
    ) -> HostResult<usize> {
        let body = self.handle("extrude")?;
        self.ops.push(Op::Extrude {
            body,
            name: name.to_string(),
            extrusion: *extrusion,
            points: sketch.points,
        });
        Ok(body)
    }

    fn combine(&mut self, target: &usize, tool: &usize) -> HostResult<usize> {
        let result = self.handle("combine")?;
        self.ops.push(Op::Combine {
            target: *target,
            tool: *tool,
            result,
        });
        Ok(result)
    }

    fn cut(&mut self, target: &usize, tool: &usize) -> HostResult<()> {
        self.handle("cut")?;
        self.ops.push(Op::Cut {
            target: *target,
            tool: *tool,
        });
        Ok(())
    }

    fn remove_body(&mut self, body: usize) -> HostResult<()> {
        self.handle("remove_body")?;
        self.ops.push(Op::Remove(body));
        Ok(())
    }

    fn mirror_body(&mut self, _component: &usize, body: &usize) -> HostResult<usize> {
        let result = self.handle("mirror_body")?;
        self.ops.push(Op::Mirror {
            source: *body,
            result,
        });
        Ok(result)
    }
}
