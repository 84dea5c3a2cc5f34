use std::f64::consts::FRAC_PI_2;

use pic_core::{stable_hash_string, ParameterSet, PicError, SimConfig, Vec2};
use pic_geom::{build_ring_bus, Material, ShapeList};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::monitor::{place_monitors, MonitorSet, WaveguideCut};

/// Which of the paired runs a setup describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Ring and bus present.
    Device,
    /// Geometry suppressed; cladding background only.
    Control,
}

/// Solver settings that must be identical between the device and control runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Pixels per µm.
    pub resolution: u32,
    /// Absorbing boundary thickness.
    pub pml: f64,
    /// Full cell extent, centred on the origin.
    pub cell_size: Vec2,
    /// Simulation time in solver units.
    pub run_until: f64,
    /// Core index painted by [`Material::Core`].
    pub n_core: f64,
    /// Cladding index, also the default material.
    pub n_clad: f64,
}

/// Gaussian dipole excitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Centre frequency in 1/µm.
    pub frequency: f64,
    /// Pulse bandwidth in 1/µm.
    pub bandwidth: f64,
    /// Driven field component.
    pub component: String,
    /// Dipole position.
    pub center: Vec2,
    /// Complex amplitude, real part only.
    pub amplitude: f64,
}

/// Everything the external solver needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSetup {
    /// Device or control.
    pub kind: RunKind,
    /// Shared solver settings.
    pub settings: RunSettings,
    /// Shapes in paint order.
    pub geometry: ShapeList,
    /// Background material.
    pub default_material: Material,
    /// Excitation.
    pub source: SourceSpec,
    /// Flux monitors.
    pub monitors: MonitorSet,
}

/// Simulation cell for a ring/bus device.
///
/// The bus-inclusive height is used for both runs so the control never
/// simulates a different cell than the device.
pub fn cell_size(config: &SimConfig, params: &ParameterSet) -> Vec2 {
    let margin = config.domain.pad + config.domain.pml;
    Vec2::new(
        2.0 * (params.ring_radius + margin),
        2.0 * (params.ring_radius + params.bus_y() + margin),
    )
}

impl RunSetup {
    /// Builds the setup of one run from the shared configuration.
    pub fn new(config: &SimConfig, kind: RunKind) -> Result<Self, PicError> {
        let params = config.base_parameters();
        let cell = cell_size(config, &params);
        let include = kind == RunKind::Device;
        let geometry = build_ring_bus(config, &params, include, include)?;
        let monitors = place_monitors(
            cell,
            config.domain.pml,
            config.domain.edge_offset,
            WaveguideCut {
                y: params.bus_y(),
                width: params.wg_width,
            },
            config.physics.center_frequency(),
        )?;
        // Dipole at the top of the ring, on its centre line.
        let theta = FRAC_PI_2;
        let source = SourceSpec {
            frequency: config.physics.center_frequency(),
            bandwidth: config.physics.frequency_width(),
            component: "Ez".to_string(),
            center: Vec2::new(
                params.ring_radius * theta.cos(),
                params.ring_radius * theta.sin(),
            ),
            amplitude: 1.0,
        };
        let settings = RunSettings {
            resolution: config.domain.resolution,
            pml: config.domain.pml,
            cell_size: cell,
            run_until: config.domain.run_until,
            n_core: Material::Core.refractive_index(&config.physics),
            n_clad: Material::Cladding.refractive_index(&config.physics),
        };
        info!(
            ?kind,
            shapes = geometry.len(),
            cell_x = cell.x,
            cell_y = cell.y,
            "prepared run setup"
        );
        Ok(Self {
            kind,
            settings,
            geometry,
            default_material: Material::Cladding,
            source,
            monitors,
        })
    }

    /// Setup with ring and bus present.
    pub fn device(config: &SimConfig) -> Result<Self, PicError> {
        Self::new(config, RunKind::Device)
    }

    /// Setup with the geometry suppressed.
    pub fn control(config: &SimConfig) -> Result<Self, PicError> {
        Self::new(config, RunKind::Control)
    }

    /// Hash over the parts of the setup both runs must agree on.
    pub fn settings_hash(&self) -> Result<String, PicError> {
        stable_hash_string(&(&self.settings, &self.source, &self.monitors))
    }
}
