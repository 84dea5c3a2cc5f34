use std::fmt::Write as _;

use pic_core::{ErrorInfo, PicError, SimConfig, POWER_FLOOR};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::monitor::MonitorSet;
use crate::setup::{RunKind, RunSetup};
use crate::solver::{FluxReadings, FluxRecord, FluxSolver};

/// Boundary readings of one run and their net outward power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPowers {
    /// Left side reading.
    pub left: f64,
    /// Right side reading.
    pub right: f64,
    /// Top side reading.
    pub top: f64,
    /// Bottom side reading.
    pub bottom: f64,
    /// Signed sum over the boundary monitors.
    pub net: f64,
}

/// Derived scalars of a device/control run pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerBudget {
    /// Power through the waveguide cut in the device run.
    pub waveguide: f64,
    /// Boundary powers with the geometry present.
    pub device: BoundaryPowers,
    /// Boundary powers in the cladding-only control.
    pub control: BoundaryPowers,
    /// Fraction of the emitted power coupled into the waveguide.
    pub beta: f64,
    /// Emission enhancement relative to the control.
    pub purcell: f64,
}

fn boundary_powers(monitors: &MonitorSet, fluxes: &FluxReadings) -> Result<BoundaryPowers, PicError> {
    let mut net = 0.0;
    for (monitor, sign) in monitors.boundary() {
        net += sign * fluxes.get(&monitor.name)?;
    }
    Ok(BoundaryPowers {
        left: fluxes.get("left")?,
        right: fluxes.get("right")?,
        top: fluxes.get("top")?,
        bottom: fluxes.get("bottom")?,
        net,
    })
}

/// Combines device and control readings into β and the Purcell proxy.
///
/// Both denominators are floored at [`POWER_FLOOR`], so a vanishing or
/// negative control power yields a large finite ratio instead of dividing
/// by zero.
pub fn compute_budget(
    monitors: &MonitorSet,
    device: &FluxReadings,
    control: &FluxReadings,
) -> Result<PowerBudget, PicError> {
    let waveguide_monitor = monitors.waveguide().ok_or_else(|| {
        PicError::Config(ErrorInfo::new("no-waveguide-monitor", "monitor set has no waveguide cut"))
    })?;
    let waveguide = device.get(&waveguide_monitor.name)?;
    let device_powers = boundary_powers(monitors, device)?;
    let control_powers = boundary_powers(monitors, control)?;
    if device_powers.net <= POWER_FLOOR {
        warn!(net = device_powers.net, "device net power at or below floor");
    }
    let beta = waveguide / device_powers.net.max(POWER_FLOOR);
    let purcell = device_powers.net / control_powers.net.max(POWER_FLOOR);
    Ok(PowerBudget {
        waveguide,
        device: device_powers,
        control: control_powers,
        beta,
        purcell,
    })
}

/// Computes the budget of two finished runs after checking they are a pair.
pub fn evaluate(
    monitors: &MonitorSet,
    device: &FluxRecord,
    control: &FluxRecord,
) -> Result<PowerBudget, PicError> {
    if device.kind != RunKind::Device || control.kind != RunKind::Control {
        return Err(PicError::Solver(
            ErrorInfo::new("run-kind-mismatch", "expected one device and one control record")
                .with_context("device", format!("{:?}", device.kind))
                .with_context("control", format!("{:?}", control.kind)),
        ));
    }
    if device.settings != control.settings {
        return Err(PicError::Solver(
            ErrorInfo::new("run-settings-mismatch", "device and control ran with different settings")
                .with_hint("rerun both with the same resolution, boundary, cell and duration"),
        ));
    }
    compute_budget(monitors, &device.fluxes, &control.fluxes)
}

/// Runs the device and control setups through `solver` and evaluates them.
pub fn simulate_budget<S: FluxSolver>(solver: &S, config: &SimConfig) -> Result<PowerBudget, PicError> {
    let device_setup = RunSetup::device(config)?;
    let control_setup = RunSetup::control(config)?;
    if device_setup.settings_hash()? != control_setup.settings_hash()? {
        return Err(PicError::solver(
            "run-settings-mismatch",
            "device and control setups diverged",
        ));
    }
    let device = solver.run(&device_setup)?;
    let control = solver.run(&control_setup)?;
    let budget = evaluate(&device_setup.monitors, &device, &control)?;
    info!(beta = budget.beta, purcell = budget.purcell, "evaluated power budget");
    Ok(budget)
}

impl PowerBudget {
    /// Plain-text report of the run pair.
    pub fn summary(&self, config: &SimConfig) -> String {
        let g = &config.geometry;
        let mut out = String::new();
        let _ = writeln!(out, "lambda0 [um]: {}", config.physics.wavelength);
        let _ = writeln!(
            out,
            "ring R={} um, w={} um, bus w={} um, gap={} um",
            g.ring_radius, g.ring_width, g.wg_width, g.gap
        );
        let _ = writeln!(out, "Beta (≈ P_bus / P_total): {:.3}", self.beta);
        let _ = writeln!(out, "Purcell proxy (P_total / P_clad): {:.2}", self.purcell);
        let _ = writeln!(out, "P_bus_device: {}", sci(self.waveguide));
        let _ = writeln!(out, "P_total_device: {}", sci(self.device.net));
        let _ = writeln!(out, "P_total_cladding: {}", sci(self.control.net));
        for (name, powers) in [("device", &self.device), ("cladding", &self.control)] {
            let _ = writeln!(
                out,
                "P_{name} left/right/top/bottom: {} {} {} {}",
                sci(powers.left),
                sci(powers.right),
                sci(powers.top),
                sci(powers.bottom)
            );
        }
        out
    }
}

// Four-digit scientific notation with a signed, two-digit exponent: 1.2000e+00.
fn sci(value: f64) -> String {
    let raw = format!("{value:.4e}");
    let Some((mantissa, exp)) = raw.split_once('e') else {
        return raw;
    };
    match exp.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        Err(_) => raw,
    }
}
