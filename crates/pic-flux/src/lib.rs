//! Flux monitors, solver run setup and power-budget evaluation.
//!
//! The FDTD engine itself is external: this crate describes what to run
//! ([`RunSetup`]), where to measure ([`MonitorSet`]), and turns the returned
//! flux integrals into a [`PowerBudget`].

mod budget;
mod monitor;
mod setup;
mod solver;

pub use budget::{compute_budget, evaluate, simulate_budget, BoundaryPowers, PowerBudget};
pub use monitor::{
    place_monitors, Axis, FluxMonitor, MonitorRole, MonitorSet, WaveguideCut, MONITOR_NAMES,
};
pub use setup::{cell_size, RunKind, RunSettings, RunSetup, SourceSpec};
pub use solver::{FluxReadings, FluxRecord, FluxSolver, RecordedSolver};
