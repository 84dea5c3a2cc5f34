use pic_core::{ErrorInfo, ParameterSet, PicError, SimConfig, Vec2};
use tracing::debug;

use crate::component::{require_positive, Component, ComponentKind, Port};
use crate::shape::{Material, Shape, ShapeList};

/// Builds the ring resonator and/or bus waveguide cross-section.
///
/// The ring is an outer core disk followed by an inner cladding disk, so the
/// cladding wins inside the hole. The bus runs along x at [`ParameterSet::bus_y`]
/// and is long enough (`2 (R + pad)`) to cross the padded region.
pub fn build_ring_bus(
    config: &SimConfig,
    params: &ParameterSet,
    include_ring: bool,
    include_bus: bool,
) -> Result<ShapeList, PicError> {
    let mut shapes = ShapeList::new();
    if include_ring {
        let outer = params.ring_radius + params.ring_width / 2.0;
        let inner = params.ring_radius - params.ring_width / 2.0;
        if !(inner.is_finite() && outer.is_finite()) || inner >= outer {
            return Err(PicError::Geometry(
                ErrorInfo::new("annulus-inverted", "inner ring radius must be below outer radius")
                    .with_context("inner_radius", inner)
                    .with_context("outer_radius", outer),
            ));
        }
        if inner < 0.0 {
            return Err(PicError::Geometry(
                ErrorInfo::new("negative-radius", "ring width exceeds twice the ring radius")
                    .with_context("inner_radius", inner)
                    .with_hint("reduce ring_width or increase ring_radius"),
            ));
        }
        shapes.push(
            Shape::Cylinder {
                center: Vec2::ZERO,
                radius: outer,
            },
            Material::Core,
        );
        shapes.push(
            Shape::Cylinder {
                center: Vec2::ZERO,
                radius: inner,
            },
            Material::Cladding,
        );
    }
    if include_bus {
        require_positive("wg_width", params.wg_width)?;
        require_positive("ring_radius", params.ring_radius)?;
        let bus_len = 2.0 * (params.ring_radius + config.domain.pad);
        let bus_y = params.bus_y();
        if !bus_y.is_finite() {
            return Err(PicError::geometry("non-finite-offset", "bus offset must be finite"));
        }
        shapes.push(
            Shape::Block {
                center: Vec2::new(0.0, bus_y),
                size: Vec2::new(bus_len, params.wg_width),
            },
            Material::Core,
        );
    }
    debug!(
        include_ring,
        include_bus,
        shapes = shapes.len(),
        "built ring/bus geometry"
    );
    Ok(shapes)
}

/// Ring plus bus as a packable component with bus ports `o1` (west) and `o2` (east).
pub fn ring_bus_component(config: &SimConfig, params: &ParameterSet) -> Result<Component, PicError> {
    let shapes = build_ring_bus(config, params, true, true)?;
    let half_len = params.ring_radius + config.domain.pad;
    let bus_y = params.bus_y();
    let ports = vec![
        Port::new("o1", Vec2::new(-half_len, bus_y), 180.0, params.wg_width),
        Port::new("o2", Vec2::new(half_len, bus_y), 0.0, params.wg_width),
    ];
    Component::new(ComponentKind::RingBus, *params, shapes, ports)
}
