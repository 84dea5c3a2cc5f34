//! Immutable run configuration loaded from YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PicError};
use crate::types::ParameterSet;

/// YAML-configurable, immutable settings for one design or simulation run.
///
/// Every section falls back to its documented default, so an empty document
/// reproduces the reference ring/bus device at 1.55 µm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    /// Wavelength and material indices.
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Default device dimensions used when a sweep does not set an axis.
    #[serde(default)]
    pub geometry: GeometryDefaults,
    /// Simulation cell, absorbing boundary and run duration.
    #[serde(default)]
    pub domain: DomainConfig,
    /// Sweep tile bounds.
    #[serde(default)]
    pub packing: PackingConfig,
    /// Remote preview listener.
    #[serde(default)]
    pub live: LiveConfig,
}

/// Optical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Target free-space wavelength in µm.
    #[serde(default = "default_wavelength")]
    pub wavelength: f64,
    /// Effective index of the silicon core.
    #[serde(default = "default_n_core")]
    pub n_core: f64,
    /// Effective index of the cladding and background.
    #[serde(default = "default_n_clad")]
    pub n_clad: f64,
    /// Gaussian source bandwidth as a fraction of the centre frequency.
    #[serde(default = "default_fractional_bandwidth")]
    pub fractional_bandwidth: f64,
}

fn default_wavelength() -> f64 {
    1.55
}

fn default_n_core() -> f64 {
    3.45
}

fn default_n_clad() -> f64 {
    1.44
}

fn default_fractional_bandwidth() -> f64 {
    0.1
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            wavelength: default_wavelength(),
            n_core: default_n_core(),
            n_clad: default_n_clad(),
            fractional_bandwidth: default_fractional_bandwidth(),
        }
    }
}

impl PhysicsConfig {
    /// Centre frequency in units of 1/µm.
    pub fn center_frequency(&self) -> f64 {
        1.0 / self.wavelength
    }

    /// Source bandwidth in units of 1/µm.
    pub fn frequency_width(&self) -> f64 {
        self.fractional_bandwidth * self.center_frequency()
    }
}

/// Baseline component dimensions in µm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDefaults {
    /// Edge-to-edge gap between coupled guides.
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Straight coupling length of a directional coupler.
    #[serde(default = "default_coupling_length")]
    pub coupling_length: f64,
    /// Bus / coupler waveguide width.
    #[serde(default = "default_width")]
    pub wg_width: f64,
    /// Ring centre-line radius.
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f64,
    /// Ring waveguide width.
    #[serde(default = "default_width")]
    pub ring_width: f64,
    /// Side length of the flattened bend.
    #[serde(default = "default_bend_size")]
    pub bend_size: f64,
}

fn default_gap() -> f64 {
    0.20
}

fn default_coupling_length() -> f64 {
    10.0
}

fn default_width() -> f64 {
    0.5
}

fn default_ring_radius() -> f64 {
    2.466
}

fn default_bend_size() -> f64 {
    2.0
}

impl Default for GeometryDefaults {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            coupling_length: default_coupling_length(),
            wg_width: default_width(),
            ring_radius: default_ring_radius(),
            ring_width: default_width(),
            bend_size: default_bend_size(),
        }
    }
}

/// Simulation cell settings shared by the device and control runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Absorbing boundary thickness in µm.
    #[serde(default = "default_pml")]
    pub pml: f64,
    /// Padding between the geometry and the absorbing boundary in µm.
    #[serde(default = "default_pad")]
    pub pad: f64,
    /// Grid resolution in pixels per µm.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Extra clearance between flux monitors and the absorbing boundary.
    #[serde(default = "default_edge_offset")]
    pub edge_offset: f64,
    /// Simulation time in solver units.
    #[serde(default = "default_run_until")]
    pub run_until: f64,
}

fn default_pml() -> f64 {
    1.0
}

fn default_pad() -> f64 {
    4.0
}

fn default_resolution() -> u32 {
    20
}

fn default_edge_offset() -> f64 {
    0.2
}

fn default_run_until() -> f64 {
    1200.0
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            pml: default_pml(),
            pad: default_pad(),
            resolution: default_resolution(),
            edge_offset: default_edge_offset(),
            run_until: default_run_until(),
        }
    }
}

/// Tile bounds for sweep galleries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingConfig {
    /// Maximum tile width and height in µm.
    #[serde(default = "default_max_tile_size")]
    pub max_tile_size: [f64; 2],
    /// Minimum clearance between neighbouring components in µm.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

fn default_max_tile_size() -> [f64; 2] {
    [5000.0, 5000.0]
}

fn default_spacing() -> f64 {
    20.0
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            max_tile_size: default_max_tile_size(),
            spacing: default_spacing(),
        }
    }
}

/// Path syntax expected by the remote viewer host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Same host, paths are sent as-is.
    #[default]
    Native,
    /// Linux-side path translated to its Windows form via `wslpath -w`.
    Wsl,
}

/// Remote preview listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Listener host name or address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listener port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect, read and write timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Upper bound on the post-send drain phase in milliseconds.
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,
    /// Path translation applied before sending.
    #[serde(default)]
    pub path_style: PathStyle,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_drain_timeout_ms() -> u64 {
    1000
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
            drain_timeout_ms: default_drain_timeout_ms(),
            path_style: PathStyle::default(),
        }
    }
}

impl SimConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, PicError> {
        let config: SimConfig = serde_yaml::from_str(text).map_err(|err| {
            PicError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load(path: &Path) -> Result<Self, PicError> {
        let text = fs::read_to_string(path).map_err(|err| {
            PicError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Rejects non-physical values before any component sees them.
    pub fn validate(&self) -> Result<(), PicError> {
        let positive = [
            ("physics.wavelength", self.physics.wavelength),
            ("physics.n_core", self.physics.n_core),
            ("physics.n_clad", self.physics.n_clad),
            ("physics.fractional_bandwidth", self.physics.fractional_bandwidth),
            ("geometry.gap", self.geometry.gap),
            ("geometry.coupling_length", self.geometry.coupling_length),
            ("geometry.wg_width", self.geometry.wg_width),
            ("geometry.ring_radius", self.geometry.ring_radius),
            ("geometry.ring_width", self.geometry.ring_width),
            ("geometry.bend_size", self.geometry.bend_size),
            ("domain.pml", self.domain.pml),
            ("domain.edge_offset", self.domain.edge_offset),
            ("domain.run_until", self.domain.run_until),
            ("packing.max_tile_size[0]", self.packing.max_tile_size[0]),
            ("packing.max_tile_size[1]", self.packing.max_tile_size[1]),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid_field(field, value, "must be finite and positive"));
            }
        }
        let non_negative = [
            ("domain.pad", self.domain.pad),
            ("packing.spacing", self.packing.spacing),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid_field(field, value, "must be finite and non-negative"));
            }
        }
        if self.domain.resolution == 0 {
            return Err(invalid_field("domain.resolution", 0.0, "must be at least 1"));
        }
        if self.live.connect_timeout_ms == 0 || self.live.drain_timeout_ms == 0 {
            return Err(PicError::Config(
                ErrorInfo::new("config-invalid", "live timeouts must be non-zero")
                    .with_context("connect_timeout_ms", self.live.connect_timeout_ms)
                    .with_context("drain_timeout_ms", self.live.drain_timeout_ms),
            ));
        }
        if self.live.host.trim().is_empty() {
            return Err(PicError::Config(
                ErrorInfo::new("config-invalid", "live.host must not be empty")
                    .with_context("field", "live.host"),
            ));
        }
        Ok(())
    }

    /// Parameter set reproducing the configured baseline device.
    pub fn base_parameters(&self) -> ParameterSet {
        ParameterSet {
            gap: self.geometry.gap,
            coupling_length: self.geometry.coupling_length,
            wg_width: self.geometry.wg_width,
            wavelength: self.physics.wavelength,
            ring_radius: self.geometry.ring_radius,
            ring_width: self.geometry.ring_width,
            bus_offset: None,
            bend_size: self.geometry.bend_size,
        }
    }
}

fn invalid_field(field: &str, value: f64, reason: &str) -> PicError {
    PicError::Config(
        ErrorInfo::new("config-invalid", format!("{field} {reason}"))
            .with_context("field", field)
            .with_context("value", value),
    )
}
