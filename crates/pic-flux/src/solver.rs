use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use pic_core::{from_json_slice, ErrorInfo, PicError};
use serde::{Deserialize, Serialize};

use crate::setup::{RunKind, RunSettings, RunSetup};

/// Integrated flux at the centre frequency, keyed by monitor name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FluxReadings(BTreeMap<String, f64>);

impl FluxReadings {
    /// Creates an empty reading set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the flux of one monitor.
    pub fn insert(&mut self, name: impl Into<String>, flux: f64) {
        self.0.insert(name.into(), flux);
    }

    /// Reads one monitor; a missing or non-finite value is a solver failure.
    pub fn get(&self, name: &str) -> Result<f64, PicError> {
        match self.0.get(name) {
            Some(value) if value.is_finite() => Ok(*value),
            Some(value) => Err(PicError::Solver(
                ErrorInfo::new("non-finite-flux", "solver reported a non-finite flux")
                    .with_context("monitor", name)
                    .with_context("value", value),
            )),
            None => Err(PicError::Solver(
                ErrorInfo::new("missing-flux", "solver reported no flux for monitor")
                    .with_context("monitor", name),
            )),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FluxReadings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Result of one finished solver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxRecord {
    /// Run the readings belong to.
    pub kind: RunKind,
    /// Settings the solver actually ran with.
    pub settings: RunSettings,
    /// Monitor readings.
    pub fluxes: FluxReadings,
}

impl FluxRecord {
    /// Reads a record written by the external engine.
    pub fn load(path: &Path) -> Result<Self, PicError> {
        let bytes = fs::read(path).map_err(|err| {
            PicError::Solver(
                ErrorInfo::new("record-read", err.to_string()).with_context("path", path.display()),
            )
        })?;
        from_json_slice(&bytes)
    }
}

/// Seam to the external FDTD engine.
///
/// Implementations run to completion or fail; callers never retry.
pub trait FluxSolver {
    /// Runs one setup to completion and returns the monitor readings.
    fn run(&self, setup: &RunSetup) -> Result<FluxRecord, PicError>;
}

/// Replays records produced by an earlier, out-of-process solver run.
#[derive(Debug, Clone)]
pub struct RecordedSolver {
    device: FluxRecord,
    control: FluxRecord,
}

impl RecordedSolver {
    /// Wraps the two records of a paired run.
    pub fn new(device: FluxRecord, control: FluxRecord) -> Self {
        Self { device, control }
    }
}

impl FluxSolver for RecordedSolver {
    fn run(&self, setup: &RunSetup) -> Result<FluxRecord, PicError> {
        let record = match setup.kind {
            RunKind::Device => &self.device,
            RunKind::Control => &self.control,
        };
        if record.kind != setup.kind {
            return Err(PicError::Solver(
                ErrorInfo::new("run-kind-mismatch", "record belongs to the other run")
                    .with_context("expected", format!("{:?}", setup.kind))
                    .with_context("found", format!("{:?}", record.kind)),
            ));
        }
        if record.settings != setup.settings {
            return Err(PicError::Solver(
                ErrorInfo::new("run-settings-mismatch", "record was produced with different settings")
                    .with_context("run", format!("{:?}", setup.kind)),
            ));
        }
        Ok(record.clone())
    }
}
