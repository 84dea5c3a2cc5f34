use std::f64::consts::PI;

use pic_core::{ParameterSet, PicError, Vec2};
use tracing::debug;

use crate::component::{require_positive, Component, ComponentKind, Port};
use crate::shape::{Material, Shape, ShapeList};

/// Number of straight segments approximating each S-bend.
pub const S_BEND_SEGMENTS: usize = 24;

/// Builds a directional coupler centred on the origin.
///
/// Two straight arms of `coupling_length` sit `gap` apart (edge to edge).
/// Each arm end fans out through a raised-cosine S-bend with run
/// `coupling_length / 2` and lateral offset `wg_width / 2`. Ports `o1`/`o2`
/// face west (bottom/top), `o3`/`o4` face east (top/bottom).
pub fn build_directional_coupler(params: &ParameterSet) -> Result<Component, PicError> {
    require_positive("gap", params.gap)?;
    require_positive("coupling_length", params.coupling_length)?;
    require_positive("wg_width", params.wg_width)?;

    let width = params.wg_width;
    let half_len = params.coupling_length / 2.0;
    let dx = params.coupling_length / 2.0;
    let dy = width / 2.0;
    let arm_y = (params.gap + width) / 2.0;

    let mut shapes = ShapeList::new();
    for side in [-1.0, 1.0] {
        shapes.push(
            Shape::Block {
                center: Vec2::new(0.0, side * arm_y),
                size: Vec2::new(params.coupling_length, width),
            },
            Material::Core,
        );
    }
    for side in [-1.0, 1.0] {
        for direction in [-1.0, 1.0] {
            let start = Vec2::new(direction * half_len, side * arm_y);
            shapes.push(
                s_bend(start, direction * dx, side * dy, width),
                Material::Core,
            );
        }
    }

    let end_x = half_len + dx;
    let end_y = arm_y + dy;
    let ports = vec![
        Port::new("o1", Vec2::new(-end_x, -end_y), 180.0, width),
        Port::new("o2", Vec2::new(-end_x, end_y), 180.0, width),
        Port::new("o3", Vec2::new(end_x, end_y), 0.0, width),
        Port::new("o4", Vec2::new(end_x, -end_y), 0.0, width),
    ];
    debug!(
        gap = params.gap,
        length = params.coupling_length,
        "built directional coupler"
    );
    Component::new(ComponentKind::DirectionalCoupler, *params, shapes, ports)
}

// Raised-cosine centre line y(t) = dy (1 - cos(pi t)) / 2 over x in [0, dx],
// widened along its normal. Both ends are horizontal, so the end faces are
// vertical and the polygon bounds equal the analytic bounds.
fn s_bend(start: Vec2, dx: f64, dy: f64, width: f64) -> Shape {
    let half = width / 2.0;
    let mut upper = Vec::with_capacity(S_BEND_SEGMENTS + 1);
    let mut lower = Vec::with_capacity(S_BEND_SEGMENTS + 1);
    for step in 0..=S_BEND_SEGMENTS {
        let t = step as f64 / S_BEND_SEGMENTS as f64;
        let center = start + Vec2::new(dx * t, dy * (1.0 - (PI * t).cos()) / 2.0);
        // Tangent (dx, dy * pi/2 * sin(pi t)), rotated by +90 degrees.
        let tangent = Vec2::new(dx, dy * PI / 2.0 * (PI * t).sin());
        let norm = (tangent.x * tangent.x + tangent.y * tangent.y).sqrt();
        let normal = Vec2::new(-tangent.y / norm, tangent.x / norm);
        upper.push(center + normal * half);
        lower.push(center - normal * half);
    }
    lower.reverse();
    upper.extend(lower);
    Shape::Polygon { vertices: upper }
}
