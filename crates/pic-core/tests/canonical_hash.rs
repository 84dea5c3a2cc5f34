use std::collections::BTreeMap;

use pic_core::{from_json_slice, stable_hash_string, to_canonical_json_bytes, BBox, Vec2};
use serde::Serialize;

#[derive(Serialize)]
struct Forward {
    alpha: u32,
    beta: &'static str,
}

#[derive(Serialize)]
struct Reversed {
    beta: &'static str,
    alpha: u32,
}

#[test]
fn field_order_does_not_change_bytes() {
    let a = to_canonical_json_bytes(&Forward { alpha: 1, beta: "x" }).unwrap();
    let b = to_canonical_json_bytes(&Reversed { beta: "x", alpha: 1 }).unwrap();
    assert_eq!(a, b);
    assert_eq!(String::from_utf8(a).unwrap(), r#"{"alpha":1,"beta":"x"}"#);
}

#[test]
fn hashes_are_stable_and_discriminating() {
    let mut map = BTreeMap::new();
    map.insert("gap", 0.15);
    let first = stable_hash_string(&map).unwrap();
    assert_eq!(first, stable_hash_string(&map).unwrap());
    assert_eq!(first.len(), 64);
    map.insert("gap", 0.16);
    assert_ne!(first, stable_hash_string(&map).unwrap());
}

#[test]
fn decode_reports_serde_family() {
    let err = from_json_slice::<BBox>(b"{not json").unwrap_err();
    assert_eq!(err.info().code, "json-decode");
    let bbox: BBox = from_json_slice(br#"{"min":{"x":0.0,"y":0.0},"max":{"x":1.0,"y":2.0}}"#).unwrap();
    assert_eq!(bbox.size(), Vec2::new(1.0, 2.0));
}

#[test]
fn boxes_touching_at_edges_do_not_overlap() {
    let a = BBox::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
    let b = a.translate(Vec2::new(1.0, 0.0));
    assert!(!a.overlaps(&b));
    assert!(a.expand(0.1).overlaps(&b));
    assert!(a.union(&b).contains_box(&b));
    assert_eq!(a.union(&b).width(), 2.0);
}
