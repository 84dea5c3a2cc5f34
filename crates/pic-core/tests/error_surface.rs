use pic_core::errors::{ErrorInfo, PicError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("label", "dc_gap0.15")
        .with_context("reason", "example")
}

#[test]
fn geometry_error_surface() {
    let err = PicError::Geometry(sample_info("annulus-inverted", "inner radius exceeds outer"));
    assert_eq!(err.info().code, "annulus-inverted");
    assert!(err.info().context.contains_key("label"));
}

#[test]
fn packing_error_surface() {
    let err = PicError::Packing(sample_info("component-too-large", "does not fit"));
    assert_eq!(err.info().code, "component-too-large");
    assert!(err.to_string().starts_with("packing error:"));
}

#[test]
fn transport_error_surface() {
    let err = PicError::transport("connect", "refused");
    assert_eq!(err.info().code, "connect");
    assert!(err.info().context.is_empty());
}

#[test]
fn solver_error_surface() {
    let err = PicError::Solver(sample_info("missing-flux", "no reading"));
    assert_eq!(err.info().code, "missing-flux");
}

#[test]
fn display_includes_context_and_hint() {
    let err = PicError::Config(ErrorInfo::new("config-invalid", "bad").with_hint("fix it"));
    let text = err.to_string();
    assert!(text.contains("(code: config-invalid)"));
    assert!(text.ends_with("| hint: fix it"));

    let err = PicError::Geometry(sample_info("g", "m"));
    assert!(err
        .to_string()
        .contains("context: [label=dc_gap0.15, reason=example]"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = PicError::Transport(sample_info("timeout", "timed out"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Transport");
    assert_eq!(json["detail"]["code"], "timeout");
    let back: PicError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
