use std::io::Write;

use pic_core::{ParameterName, PathStyle, PicError, SimConfig};

#[test]
fn empty_document_yields_reference_device() {
    let config = SimConfig::from_yaml_str("{}").expect("config");
    assert_eq!(config, SimConfig::default());
    assert_eq!(config.physics.wavelength, 1.55);
    assert_eq!(config.geometry.ring_radius, 2.466);
    assert_eq!(config.domain.resolution, 20);
    assert_eq!(config.domain.run_until, 1200.0);
    assert_eq!(config.live.port, 8082);
    assert_eq!(config.live.path_style, PathStyle::Native);
    assert_eq!(config.packing.max_tile_size, [5000.0, 5000.0]);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let yaml = "physics:\n  wavelength: 1.31\ndomain:\n  resolution: 40\nlive:\n  path_style: wsl\n";
    let config = SimConfig::from_yaml_str(yaml).expect("config");
    assert_eq!(config.physics.wavelength, 1.31);
    assert_eq!(config.physics.n_core, 3.45);
    assert_eq!(config.domain.resolution, 40);
    assert_eq!(config.domain.pml, 1.0);
    assert_eq!(config.live.path_style, PathStyle::Wsl);
}

#[test]
fn derived_frequencies_follow_wavelength() {
    let config = SimConfig::default();
    let fcen = config.physics.center_frequency();
    assert!((fcen - 1.0 / 1.55).abs() < 1e-12);
    assert!((config.physics.frequency_width() - 0.1 * fcen).abs() < 1e-12);
}

#[test]
fn rejects_non_positive_dimensions() {
    let err = SimConfig::from_yaml_str("geometry:\n  ring_width: 0.0\n").unwrap_err();
    match err {
        PicError::Config(info) => {
            assert_eq!(info.code, "config-invalid");
            assert_eq!(info.context["field"], "geometry.ring_width");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(SimConfig::from_yaml_str("domain:\n  resolution: 0\n").is_err());
    assert!(SimConfig::from_yaml_str("packing:\n  spacing: -1.0\n").is_err());
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = SimConfig::from_yaml_str("physics: [1, 2").unwrap_err();
    assert_eq!(err.info().code, "config-parse");
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "geometry:\n  gap: 0.15").expect("write");
    let config = SimConfig::load(file.path()).expect("load");
    assert_eq!(config.geometry.gap, 0.15);

    let missing = SimConfig::load(std::path::Path::new("/nonexistent/config.yaml")).unwrap_err();
    assert_eq!(missing.info().code, "config-read");
}

#[test]
fn base_parameters_derive_bus_position() {
    let params = SimConfig::default().base_parameters();
    let expected = 2.466 + 0.25 + 0.20 + 0.25;
    assert!((params.bus_y() - expected).abs() < 1e-12);
    let moved = params.with(ParameterName::BusOffset, 5.0);
    assert_eq!(moved.bus_y(), 5.0);
    assert_eq!(moved.get(ParameterName::Gap), 0.20);
    assert_eq!("coupling_length".parse::<ParameterName>().unwrap(), ParameterName::CouplingLength);
    assert!("radius".parse::<ParameterName>().is_err());
}
