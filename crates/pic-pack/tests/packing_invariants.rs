use pic_core::{ParameterName, PicError, SimConfig, Vec2};
use pic_geom::{Component, ComponentKind, Material, Shape, ShapeList};
use pic_pack::pack;
use proptest::prelude::*;

fn block(label: &str, width: f64, height: f64) -> Component {
    let mut shapes = ShapeList::new();
    shapes.push(
        Shape::Block {
            center: Vec2::new(width / 2.0 - 3.0, height / 2.0 + 1.0),
            size: Vec2::new(width, height),
        },
        Material::Core,
    );
    Component::new(
        ComponentKind::FlatBend,
        SimConfig::default().base_parameters(),
        shapes,
        Vec::new(),
    )
    .expect("component")
    .with_label(label)
}

#[test]
fn fills_shelves_left_to_right() {
    let parts = vec![block("a", 40.0, 10.0), block("b", 40.0, 10.0), block("c", 40.0, 10.0)];
    let layout = pack(parts, Vec2::new(100.0, 100.0), 10.0).expect("pack");
    layout.verify().expect("valid");
    assert_eq!(layout.tiles.len(), 1);
    let placements = &layout.tiles[0].placements;
    assert_eq!(placements[0].bbox.min, Vec2::new(5.0, 5.0));
    assert_eq!(placements[1].bbox.min, Vec2::new(55.0, 5.0));
    // Third item wraps onto the next shelf.
    assert_eq!(placements[2].bbox.min, Vec2::new(5.0, 25.0));
}

#[test]
fn taller_items_go_first_ties_keep_input_order() {
    let parts = vec![block("short", 10.0, 5.0), block("tall", 10.0, 30.0), block("short2", 10.0, 5.0)];
    let layout = pack(parts, Vec2::new(1000.0, 1000.0), 0.0).expect("pack");
    let labels: Vec<_> = layout.tiles[0]
        .placements
        .iter()
        .map(|p| p.component.label.as_str())
        .collect();
    assert_eq!(labels, ["tall", "short", "short2"]);
}

#[test]
fn full_tiles_open_new_tiles() {
    let parts: Vec<_> = (0..5).map(|i| block(&format!("p{i}"), 45.0, 45.0)).collect();
    let layout = pack(parts, Vec2::new(100.0, 100.0), 5.0).expect("pack");
    layout.verify().expect("valid");
    assert_eq!(layout.tiles.len(), 2);
    assert_eq!(layout.tiles[0].placements.len(), 4);
    assert_eq!(layout.tiles[1].index, 1);
    assert_eq!(layout.len(), 5);
}

#[test]
fn oversized_component_fails() {
    let err = pack(vec![block("big", 95.0, 10.0)], Vec2::new(100.0, 100.0), 10.0).unwrap_err();
    match err {
        PicError::Packing(info) => {
            assert_eq!(info.code, "component-too-large");
            assert_eq!(info.context["label"], "big");
        }
        other => panic!("unexpected {other:?}"),
    }
    // Exactly fitting footprint is accepted.
    pack(vec![block("fit", 90.0, 90.0)], Vec2::new(100.0, 100.0), 10.0).expect("fits");
}

#[test]
fn rejects_invalid_bounds() {
    assert_eq!(
        pack(Vec::new(), Vec2::new(0.0, 10.0), 1.0).unwrap_err().info().code,
        "invalid-tile"
    );
    assert_eq!(
        pack(Vec::new(), Vec2::new(10.0, 10.0), -1.0).unwrap_err().info().code,
        "invalid-spacing"
    );
    assert!(pack(Vec::new(), Vec2::new(10.0, 10.0), 1.0).unwrap().is_empty());
}

#[test]
fn verify_flags_placements_closer_than_spacing() {
    let parts = vec![block("a", 40.0, 10.0), block("b", 40.0, 10.0)];
    let mut layout = pack(parts, Vec2::new(100.0, 100.0), 10.0).expect("pack");
    layout.verify().expect("valid");
    // Shift "b" left so the gap shrinks from 10 to 9.
    let moved = &mut layout.tiles[0].placements[1];
    moved.bbox = moved.bbox.translate(Vec2::new(-1.0, 0.0));
    match layout.verify().unwrap_err() {
        PicError::Packing(info) => {
            assert_eq!(info.code, "overlap");
            assert_eq!(info.context["first"], "a");
            assert_eq!(info.context["second"], "b");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn verify_flags_placements_outside_the_tile() {
    let parts = vec![block("a", 40.0, 10.0), block("b", 40.0, 10.0)];
    let mut layout = pack(parts, Vec2::new(100.0, 100.0), 10.0).expect("pack");
    // "b" ends at x=95; one more unit puts its spacing margin past the edge.
    let moved = &mut layout.tiles[0].placements[1];
    moved.bbox = moved.bbox.translate(Vec2::new(1.0, 0.0));
    match layout.verify().unwrap_err() {
        PicError::Packing(info) => {
            assert_eq!(info.code, "out-of-tile");
            assert_eq!(info.context["label"], "b");
            assert_eq!(info.context["tile"], "0");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn shapes_follow_their_placement() {
    let config = SimConfig::default();
    let params = config.base_parameters().with(ParameterName::BendSize, 3.0);
    let bend = ComponentKind::FlatBend.build(&config, &params).unwrap();
    let layout = pack(vec![bend], Vec2::new(50.0, 50.0), 2.0).unwrap();
    let placement = &layout.tiles[0].placements[0];
    let moved = placement.shapes().bbox().unwrap();
    assert!((moved.min.x - 1.0).abs() < 1e-12);
    assert!((moved.min.y - 1.0).abs() < 1e-12);
    assert_eq!(moved, placement.bbox);
}

proptest! {
    #[test]
    fn packed_layouts_never_overlap(
        sizes in proptest::collection::vec((1.0f64..60.0, 1.0f64..60.0), 0..40),
        spacing in 0.0f64..8.0,
    ) {
        let parts: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h))| block(&format!("p{i}"), *w, *h))
            .collect();
        let count = parts.len();
        let tile = Vec2::new(120.0, 120.0);
        let layout = pack(parts.clone(), tile, spacing).unwrap();
        prop_assert!(layout.verify().is_ok());
        prop_assert_eq!(layout.len(), count);
        for (_, placement) in layout.placements() {
            prop_assert!(placement.bbox.max.x + spacing / 2.0 <= tile.x + 1e-9);
            prop_assert!(placement.bbox.max.y + spacing / 2.0 <= tile.y + 1e-9);
        }
        let again = pack(parts, tile, spacing).unwrap();
        prop_assert_eq!(layout, again);
    }
}
