use pic_core::{ParameterSet, PicError, Vec2};

use crate::component::{require_positive, Component, ComponentKind, Port};
use crate::shape::{Material, Shape, ShapeList};

/// Chamfer angle of the flattened bend in radians (67.5 degrees).
pub const FLAT_BEND_CHAMFER: f64 = 1.178097;

/// Builds the five-vertex flattened bend with side `bend_size`.
///
/// The outer corner is replaced by facets through `(s + c, s)` and
/// `(s, s + c)` with `c = s / tan(FLAT_BEND_CHAMFER)`.
pub fn build_flat_bend(params: &ParameterSet) -> Result<Component, PicError> {
    let size = params.bend_size;
    require_positive("bend_size", size)?;
    let chamfer = size / FLAT_BEND_CHAMFER.tan();

    let mut shapes = ShapeList::new();
    shapes.push(
        Shape::Polygon {
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(size, 0.0),
                Vec2::new(size + chamfer, size),
                Vec2::new(size, size + chamfer),
                Vec2::new(0.0, size),
            ],
        },
        Material::Core,
    );
    let ports = vec![
        Port::new("o_in", Vec2::new(0.0, size / 2.0), 180.0, size),
        Port::new("o_out", Vec2::new(size / 2.0, 0.0), 270.0, size),
    ];
    Component::new(ComponentKind::FlatBend, *params, shapes, ports)
}
