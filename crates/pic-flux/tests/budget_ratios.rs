use pic_core::{PicError, SimConfig, Vec2, POWER_FLOOR};
use pic_flux::{compute_budget, evaluate, place_monitors, FluxReadings, FluxRecord, RunKind, RunSetup, WaveguideCut};

const TOL: f64 = 1e-12;

fn monitors() -> pic_flux::MonitorSet {
    place_monitors(Vec2::new(20.0, 20.0), 1.0, 0.2, WaveguideCut { y: 3.0, width: 0.5 }, 0.645).unwrap()
}

fn readings(wg: f64, right: f64, left: f64, top: f64, bottom: f64) -> FluxReadings {
    [("wg", wg), ("right", right), ("left", left), ("top", top), ("bottom", bottom)]
        .into_iter()
        .collect()
}

#[test]
fn reference_ratios() {
    let device = readings(1.2, 2.0, 0.5, 0.3, 0.2);
    let control = readings(0.0, 1.0, 1.0, 0.5, 0.5);
    let budget = compute_budget(&monitors(), &device, &control).expect("budget");
    assert!((budget.device.net - 2.0).abs() < TOL);
    assert!((budget.control.net - 1.0).abs() < TOL);
    assert!((budget.beta - 0.6).abs() < TOL);
    assert!((budget.purcell - 2.0).abs() < TOL);
    assert_eq!(budget.waveguide, 1.2);
    assert_eq!(budget.device.right, 2.0);
}

#[test]
fn zero_control_is_floored() {
    let device = readings(1.2, 2.0, 0.5, 0.3, 0.2);
    let control = readings(0.0, 0.0, 0.0, 0.0, 0.0);
    let budget = compute_budget(&monitors(), &device, &control).expect("budget");
    assert!(budget.purcell.is_finite());
    assert!((budget.purcell - 2.0 / POWER_FLOOR).abs() / budget.purcell < 1e-12);
}

#[test]
fn negative_device_net_floors_beta() {
    let device = readings(1e-13, 0.0, 0.0, 0.5, 0.5);
    let control = readings(0.0, 1.0, 1.0, 0.5, 0.5);
    let budget = compute_budget(&monitors(), &device, &control).expect("budget");
    assert!((budget.device.net + 1.0).abs() < TOL);
    assert!((budget.beta - 0.1).abs() < 1e-9);
}

#[test]
fn missing_reading_is_a_solver_error() {
    let mut device = readings(1.2, 2.0, 0.5, 0.3, 0.2);
    let control: FluxReadings = [("right", 1.0), ("left", 1.0), ("top", 0.5)].into_iter().collect();
    match compute_budget(&monitors(), &device, &control) {
        Err(PicError::Solver(info)) => {
            assert_eq!(info.code, "missing-flux");
            assert_eq!(info.context["monitor"], "bottom");
        }
        other => panic!("expected solver error, got {other:?}"),
    }
    device.insert("wg", f64::NAN);
    let control = readings(0.0, 1.0, 1.0, 0.5, 0.5);
    let err = compute_budget(&monitors(), &device, &control).unwrap_err();
    assert_eq!(err.info().code, "non-finite-flux");
}

#[test]
fn evaluate_rejects_diverging_runs() {
    let config = SimConfig::default();
    let setup = RunSetup::device(&config).unwrap();
    let device = FluxRecord {
        kind: RunKind::Device,
        settings: setup.settings.clone(),
        fluxes: readings(1.2, 2.0, 0.5, 0.3, 0.2),
    };
    let mut control = FluxRecord {
        kind: RunKind::Control,
        settings: setup.settings.clone(),
        fluxes: readings(0.0, 1.0, 1.0, 0.5, 0.5),
    };
    let budget = evaluate(&setup.monitors, &device, &control).expect("budget");
    assert!((budget.beta - 0.6).abs() < TOL);

    control.settings.resolution = 40;
    assert_eq!(
        evaluate(&setup.monitors, &device, &control).unwrap_err().info().code,
        "run-settings-mismatch"
    );
    assert_eq!(
        evaluate(&setup.monitors, &device, &device).unwrap_err().info().code,
        "run-kind-mismatch"
    );
}

#[test]
fn summary_lists_ratios_and_raw_powers() {
    let config = SimConfig::default();
    let budget = compute_budget(
        &monitors(),
        &readings(1.2, 2.0, 0.5, 0.3, 0.2),
        &readings(0.0, 1.0, 1.0, 0.5, 0.5),
    )
    .unwrap();
    let text = budget.summary(&config);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "lambda0 [um]: 1.55");
    assert_eq!(lines[1], "ring R=2.466 um, w=0.5 um, bus w=0.5 um, gap=0.2 um");
    assert_eq!(lines[2], "Beta (≈ P_bus / P_total): 0.600");
    assert_eq!(lines[3], "Purcell proxy (P_total / P_clad): 2.00");
    assert_eq!(lines[4], "P_bus_device: 1.2000e+00");
    assert!(text.contains("P_total_cladding: 1.0000e+00"));
    assert!(text.contains("P_device left/right/top/bottom: 5.0000e-01 2.0000e+00 3.0000e-01 2.0000e-01"));
}

#[test]
fn summary_exponents_keep_sign_and_two_digits() {
    let budget = compute_budget(
        &monitors(),
        &readings(1e-13, 0.0, 0.0, 0.5, 0.5),
        &readings(0.0, 1.0, 1.0, 0.5, 0.5),
    )
    .unwrap();
    let text = budget.summary(&SimConfig::default());
    assert!(text.contains("P_bus_device: 1.0000e-13\n"));
    assert!(text.contains("P_total_device: -1.0000e+00\n"));
    assert!(text.contains("P_device left/right/top/bottom: 0.0000e+00 0.0000e+00 5.0000e-01 5.0000e-01"));
}
