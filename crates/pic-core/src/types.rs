use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PicError};

/// Named scalar dimensions of a parametric component, all in µm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Edge-to-edge gap between coupled guides.
    pub gap: f64,
    /// Straight coupling length.
    pub coupling_length: f64,
    /// Bus / coupler waveguide width.
    pub wg_width: f64,
    /// Design wavelength.
    pub wavelength: f64,
    /// Ring centre-line radius.
    pub ring_radius: f64,
    /// Ring waveguide width.
    pub ring_width: f64,
    /// Bus centre line above the ring centre; derived from the gap when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus_offset: Option<f64>,
    /// Side length of the flattened bend.
    pub bend_size: f64,
}

impl ParameterSet {
    /// Vertical position of the bus centre line.
    ///
    /// The derived value places the bus `gap` above the outer ring edge.
    pub fn bus_y(&self) -> f64 {
        self.bus_offset.unwrap_or(
            self.ring_radius + self.ring_width / 2.0 + self.gap + self.wg_width / 2.0,
        )
    }

    /// Reads a parameter by name.
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::Gap => self.gap,
            ParameterName::CouplingLength => self.coupling_length,
            ParameterName::WgWidth => self.wg_width,
            ParameterName::Wavelength => self.wavelength,
            ParameterName::RingRadius => self.ring_radius,
            ParameterName::RingWidth => self.ring_width,
            ParameterName::BusOffset => self.bus_y(),
            ParameterName::BendSize => self.bend_size,
        }
    }

    /// Returns a copy with one parameter replaced.
    pub fn with(mut self, name: ParameterName, value: f64) -> Self {
        match name {
            ParameterName::Gap => self.gap = value,
            ParameterName::CouplingLength => self.coupling_length = value,
            ParameterName::WgWidth => self.wg_width = value,
            ParameterName::Wavelength => self.wavelength = value,
            ParameterName::RingRadius => self.ring_radius = value,
            ParameterName::RingWidth => self.ring_width = value,
            ParameterName::BusOffset => self.bus_offset = Some(value),
            ParameterName::BendSize => self.bend_size = value,
        }
        self
    }
}

/// Identifier of a sweepable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    /// [`ParameterSet::gap`].
    Gap,
    /// [`ParameterSet::coupling_length`].
    CouplingLength,
    /// [`ParameterSet::wg_width`].
    WgWidth,
    /// [`ParameterSet::wavelength`].
    Wavelength,
    /// [`ParameterSet::ring_radius`].
    RingRadius,
    /// [`ParameterSet::ring_width`].
    RingWidth,
    /// [`ParameterSet::bus_offset`].
    BusOffset,
    /// [`ParameterSet::bend_size`].
    BendSize,
}

impl ParameterName {
    /// All parameters in canonical order.
    pub const ALL: [ParameterName; 8] = [
        ParameterName::Gap,
        ParameterName::CouplingLength,
        ParameterName::WgWidth,
        ParameterName::Wavelength,
        ParameterName::RingRadius,
        ParameterName::RingWidth,
        ParameterName::BusOffset,
        ParameterName::BendSize,
    ];

    /// Snake-case name used in plans and metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::Gap => "gap",
            ParameterName::CouplingLength => "coupling_length",
            ParameterName::WgWidth => "wg_width",
            ParameterName::Wavelength => "wavelength",
            ParameterName::RingRadius => "ring_radius",
            ParameterName::RingWidth => "ring_width",
            ParameterName::BusOffset => "bus_offset",
            ParameterName::BendSize => "bend_size",
        }
    }

    /// Short tag used inside component labels.
    pub fn label_tag(&self) -> &'static str {
        match self {
            ParameterName::Gap => "gap",
            ParameterName::CouplingLength => "Lc",
            ParameterName::WgWidth => "w",
            ParameterName::Wavelength => "lam",
            ParameterName::RingRadius => "R",
            ParameterName::RingWidth => "rw",
            ParameterName::BusOffset => "bus",
            ParameterName::BendSize => "s",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = PicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                PicError::Config(
                    ErrorInfo::new("unknown-parameter", format!("unknown parameter `{s}`"))
                        .with_hint("expected one of gap, coupling_length, wg_width, wavelength, ring_radius, ring_width, bus_offset, bend_size"),
                )
            })
    }
}
