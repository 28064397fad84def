//! Turning computed geometry into host bodies.

use std::f64::consts::PI;

use snapfit_geometry::{BodyPlan, FeatureGeometry, FeatureVariant};
use snapfit_params::ParameterSet;
use snapfit_profile::ProfileOutline;
use tracing::debug;

use crate::adapter::{HostAdapter, SketchSink};
use crate::error::HostResult;

/// Rotation applied when joining the feature to a target joint origin.
pub const PLACEMENT_ANGLE: f64 = PI;

/// Optional selections the user made for a build.
///
/// Anything left unset is simply skipped: no placement without a joint, no
/// combine without a join body, no clearance cut without cut bodies.
#[derive(Debug)]
pub struct BuildTargets<'a, B, J> {
    /// Joint origin the feature is placed against.
    pub joint: Option<&'a J>,
    /// Body the snap is combined into. For the pin family, the target of
    /// the first support body.
    pub join_body: Option<&'a B>,
    /// Target of the mirrored support body (pin family only).
    pub second_join_body: Option<&'a B>,
    /// Bodies the clearance is cut from (standard families only).
    pub cut_bodies: &'a [B],
}

impl<B, J> BuildTargets<'_, B, J> {
    /// No selections.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B, J> Default for BuildTargets<'_, B, J> {
    fn default() -> Self {
        Self {
            joint: None,
            join_body: None,
            second_join_body: None,
            cut_bodies: &[],
        }
    }
}

/// Bodies produced by a build.
#[derive(Debug)]
pub struct BuiltFeature<C, B> {
    /// The new component holding the feature.
    pub component: C,
    /// The snap (or pin) body.
    pub body: B,
    /// The clearance body, when it is left in the model.
    pub clearance: Option<B>,
    /// Support bodies, for families that have them.
    pub supports: Vec<B>,
}

/// Draw `outline` into `sketch`: points in index order, then lines, then arcs.
pub fn draw_outline<S: SketchSink>(
    sketch: &mut S,
    outline: &ProfileOutline,
) -> HostResult<Vec<S::Point>> {
    let points = outline
        .points()
        .iter()
        .map(|p| sketch.add_point(*p))
        .collect::<HostResult<Vec<_>>>()?;

    for &(a, b) in outline.lines() {
        sketch.add_line(points[a], points[b])?;
    }
    for arc in outline.arcs() {
        sketch.add_arc(points[arc.center], points[arc.start], arc.sweep)?;
    }
    Ok(points)
}

fn extrude_plan<H: HostAdapter>(
    host: &mut H,
    component: &H::Component,
    plan: &BodyPlan,
    name: &str,
) -> HostResult<H::Body> {
    let mut sketch = host.new_sketch(component)?;
    draw_outline(&mut sketch, &plan.outline)?;
    debug!(
        name,
        points = plan.outline.len(),
        distance = plan.extrusion.distance,
        start = plan.extrusion.start_offset,
        "extruding body"
    );
    host.extrude(component, &sketch, &plan.extrusion, name)
}

fn component_name(variant: FeatureVariant) -> &'static str {
    match variant {
        FeatureVariant::Cantilever => "Cantilever",
        FeatureVariant::CantileverPin => "Cantilever pin",
        FeatureVariant::Pin => "Pin",
    }
}

/// Create the bodies of `geometry` in `host`.
///
/// The component's joint origin sits at the geometry's offset and is placed
/// against the target joint if one is given. Families with a support body
/// build it twice (once mirrored), combine each into its target and cut the
/// clearance from the result; the others combine the snap body into the
/// join target and cut the clearance from each cut target before removing it.
pub fn build_feature<H: HostAdapter>(
    host: &mut H,
    geometry: &FeatureGeometry,
    targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
) -> HostResult<BuiltFeature<H::Component, H::Body>> {
    let component = host.new_component(component_name(geometry.variant))?;
    let origin = host.create_joint_origin(&component, geometry.offset)?;
    if let Some(target) = targets.joint {
        host.place(&origin, target, PLACEMENT_ANGLE)?;
    }

    match &geometry.addition {
        Some(addition) => build_with_supports(host, component, geometry, addition, targets),
        None => build_standard(host, component, geometry, targets),
    }
}

fn build_standard<H: HostAdapter>(
    host: &mut H,
    component: H::Component,
    geometry: &FeatureGeometry,
    targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
) -> HostResult<BuiltFeature<H::Component, H::Body>> {
    let body = extrude_plan(host, &component, &geometry.join, "Snap body")?;
    if let Some(target) = targets.join_body {
        host.combine(target, &body)?;
    }

    if !targets.cut_bodies.is_empty() {
        let tool = extrude_plan(host, &component, &geometry.cut, "Clearance body")?;
        for target in targets.cut_bodies {
            host.cut(target, &tool)?;
        }
        host.remove_body(tool)?;
    }

    Ok(BuiltFeature {
        component,
        body,
        clearance: None,
        supports: Vec::new(),
    })
}

fn build_with_supports<H: HostAdapter>(
    host: &mut H,
    component: H::Component,
    geometry: &FeatureGeometry,
    addition: &BodyPlan,
    targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
) -> HostResult<BuiltFeature<H::Component, H::Body>> {
    let body = extrude_plan(host, &component, &geometry.join, "Pin body")?;
    let clearance = extrude_plan(host, &component, &geometry.cut, "Subtraction body")?;
    let first = extrude_plan(host, &component, addition, "Addition body 1")?;
    let second = host.mirror_body(&component, &first)?;

    let mut supports = Vec::with_capacity(2);
    for (support, target) in [(first, targets.join_body), (second, targets.second_join_body)] {
        match target {
            Some(target) => {
                let combined = host.combine(target, &support)?;
                host.cut(&combined, &clearance)?;
            }
            None => host.cut(&support, &clearance)?,
        }
        supports.push(support);
    }

    Ok(BuiltFeature {
        component,
        body,
        clearance: Some(clearance),
        supports,
    })
}

/// Compute the geometry for `params` and build it in `host`.
pub fn build<H: HostAdapter>(
    host: &mut H,
    variant: FeatureVariant,
    params: &ParameterSet,
    targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
) -> HostResult<BuiltFeature<H::Component, H::Body>> {
    let geometry = variant.build(params)?;
    build_feature(host, &geometry, targets)
}
