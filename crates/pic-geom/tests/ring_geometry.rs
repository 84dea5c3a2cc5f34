use pic_core::{ParameterName, PicError, SimConfig, Vec2};
use pic_geom::{build_ring_bus, ring_bus_component, Material, Shape};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

#[test]
fn paint_order_matches_emission_order() {
    let config = SimConfig::default();
    let params = config.base_parameters();
    let shapes = build_ring_bus(&config, &params, true, true).expect("geometry");
    let placed = shapes.as_slice();
    assert_eq!(placed.len(), 3);
    for (idx, shape) in placed.iter().enumerate() {
        assert_eq!(shape.z_order as usize, idx);
    }
    assert!(matches!(placed[0].shape, Shape::Cylinder { radius, .. } if (radius - 2.716).abs() < TOL));
    assert!(matches!(placed[1].shape, Shape::Cylinder { radius, .. } if (radius - 2.216).abs() < TOL));
    assert_eq!(placed[1].material, Material::Cladding);
    assert!(matches!(placed[2].shape, Shape::Block { .. }));
}

#[test]
fn later_shapes_win_inside_overlaps() {
    let config = SimConfig::default();
    let params = config.base_parameters();
    let shapes = build_ring_bus(&config, &params, true, true).expect("geometry");
    assert_eq!(shapes.material_at(Vec2::ZERO), Some(Material::Cladding));
    assert_eq!(shapes.material_at(Vec2::new(2.466, 0.0)), Some(Material::Core));
    assert_eq!(shapes.material_at(Vec2::new(0.0, params.bus_y())), Some(Material::Core));
    assert_eq!(shapes.material_at(Vec2::new(5.0, -5.0)), None);
}

#[test]
fn flags_select_sub_features() {
    let config = SimConfig::default();
    let params = config.base_parameters();
    assert_eq!(build_ring_bus(&config, &params, true, false).unwrap().len(), 2);
    assert_eq!(build_ring_bus(&config, &params, false, true).unwrap().len(), 1);
    let control = build_ring_bus(&config, &params, false, false).unwrap();
    assert!(control.is_empty());
    assert!(control.bbox().is_none());
}

#[test]
fn degenerate_annulus_is_rejected() {
    let config = SimConfig::default();
    let zero_width = config.base_parameters().with(ParameterName::RingWidth, 0.0);
    match build_ring_bus(&config, &zero_width, true, false) {
        Err(PicError::Geometry(info)) => assert_eq!(info.code, "annulus-inverted"),
        other => panic!("expected geometry error, got {other:?}"),
    }
    let too_wide = config
        .base_parameters()
        .with(ParameterName::RingRadius, 0.2)
        .with(ParameterName::RingWidth, 0.5);
    match build_ring_bus(&config, &too_wide, true, false) {
        Err(PicError::Geometry(info)) => assert_eq!(info.code, "negative-radius"),
        other => panic!("expected geometry error, got {other:?}"),
    }
}

#[test]
fn component_exposes_bus_ports() {
    let config = SimConfig::default();
    let params = config.base_parameters();
    let component = ring_bus_component(&config, &params).expect("component");
    let west = component.port("o1").expect("o1");
    let east = component.port("o2").expect("o2");
    assert_eq!(west.orientation, 180.0);
    assert!((east.center.x - (2.466 + 4.0)).abs() < TOL);
    assert!((west.center.y - params.bus_y()).abs() < TOL);
    assert_eq!(component.info["gap"], 0.20);
}

proptest! {
    #[test]
    fn bbox_matches_analytic_extents(
        radius in 1.0f64..20.0,
        ring_width in 0.05f64..0.9,
        wg_width in 0.05f64..1.5,
        gap in 0.01f64..1.0,
    ) {
        let config = SimConfig::default();
        let params = config
            .base_parameters()
            .with(ParameterName::RingRadius, radius)
            .with(ParameterName::RingWidth, ring_width)
            .with(ParameterName::WgWidth, wg_width)
            .with(ParameterName::Gap, gap);
        let bbox = build_ring_bus(&config, &params, true, true).unwrap().bbox().unwrap();
        let outer = radius + ring_width / 2.0;
        let half_x = (radius + config.domain.pad).max(outer);
        let top = outer + gap + wg_width;
        prop_assert!((bbox.min.x + half_x).abs() < TOL);
        prop_assert!((bbox.max.x - half_x).abs() < TOL);
        prop_assert!((bbox.min.y + outer).abs() < TOL);
        prop_assert!((bbox.max.y - top).abs() < TOL);
    }

    #[test]
    fn inverted_annulus_always_fails(radius in 0.5f64..10.0, ring_width in -2.0f64..=0.0) {
        let config = SimConfig::default();
        let params = config
            .base_parameters()
            .with(ParameterName::RingRadius, radius)
            .with(ParameterName::RingWidth, ring_width);
        let result = build_ring_bus(&config, &params, true, true);
        prop_assert!(matches!(result, Err(PicError::Geometry(_))));
    }

    #[test]
    fn builds_are_deterministic(radius in 1.0f64..10.0, gap in 0.05f64..0.5) {
        let config = SimConfig::default();
        let params = config
            .base_parameters()
            .with(ParameterName::RingRadius, radius)
            .with(ParameterName::Gap, gap);
        prop_assert_eq!(
            build_ring_bus(&config, &params, true, true).unwrap(),
            build_ring_bus(&config, &params, true, true).unwrap()
        );
    }
}
