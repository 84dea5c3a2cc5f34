use std::collections::BTreeSet;

use pic_core::{ParameterName, SimConfig};
use pic_pack::{format_quantized, LabelField, LabelKey};
use proptest::prelude::*;

fn dc_fields() -> Vec<LabelField> {
    [
        ParameterName::Gap,
        ParameterName::CouplingLength,
        ParameterName::WgWidth,
        ParameterName::Wavelength,
    ]
    .into_iter()
    .map(|name| LabelField { name, precision: None })
    .collect()
}

#[test]
fn reproduces_coupler_naming() {
    let params = SimConfig::default()
        .base_parameters()
        .with(ParameterName::Gap, 0.15)
        .with(ParameterName::CouplingLength, 10.0);
    let key = LabelKey::quantize(&dc_fields(), &params).expect("key");
    assert_eq!(key.render("dc"), "dc_gap0.15_Lc10.0_w0.50_lam1.55");
}

#[test]
fn quantized_formatting_is_exact() {
    assert_eq!(format_quantized(15, 2), "0.15");
    assert_eq!(format_quantized(-5, 3), "-0.005");
    assert_eq!(format_quantized(0, 2), "0.00");
    assert_eq!(format_quantized(1200, 0), "1200");
    assert_eq!(format_quantized(100, 1), "10.0");
}

#[test]
fn negative_zero_shares_the_zero_label() {
    let fields = vec![LabelField { name: ParameterName::BusOffset, precision: Some(2) }];
    let base = SimConfig::default().base_parameters();
    let pos = LabelKey::quantize(&fields, &base.with(ParameterName::BusOffset, 0.0)).unwrap();
    let neg = LabelKey::quantize(&fields, &base.with(ParameterName::BusOffset, -0.0)).unwrap();
    assert_eq!(pos.render("ring"), neg.render("ring"));
    assert_eq!(pos.render("ring"), "ring_bus0.00");
}

#[test]
fn excessive_precision_is_rejected() {
    let fields = vec![LabelField { name: ParameterName::Gap, precision: Some(12) }];
    let err = LabelKey::quantize(&fields, &SimConfig::default().base_parameters()).unwrap_err();
    assert_eq!(err.info().code, "precision-too-high");
}

proptest! {
    #[test]
    fn labels_are_injective_on_quantized_tuples(
        gaps in proptest::collection::vec(1i64..500, 1..12),
        lengths in proptest::collection::vec(1i64..2000, 1..6),
    ) {
        let base = SimConfig::default().base_parameters();
        let fields = dc_fields();
        let mut keys = BTreeSet::new();
        let mut labels = BTreeSet::new();
        for gap in &gaps {
            for length in &lengths {
                let params = base
                    .with(ParameterName::Gap, *gap as f64 / 100.0)
                    .with(ParameterName::CouplingLength, *length as f64 / 10.0);
                let key = LabelKey::quantize(&fields, &params).unwrap();
                let label = key.render("dc");
                let again = LabelKey::quantize(&fields, &params).unwrap().render("dc");
                prop_assert_eq!(&label, &again);
                keys.insert((*gap, *length));
                labels.insert(label);
            }
        }
        prop_assert_eq!(keys.len(), labels.len());
    }
}
