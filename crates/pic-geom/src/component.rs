use std::collections::BTreeMap;

use pic_core::{BBox, ErrorInfo, ParameterName, ParameterSet, PicError, SimConfig, Vec2};
use serde::{Deserialize, Serialize};

use crate::bend::build_flat_bend;
use crate::coupler::build_directional_coupler;
use crate::ring::ring_bus_component;
use crate::shape::ShapeList;

/// Parametric component families the builders know how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Ring resonator with a straight bus waveguide above it.
    RingBus,
    /// Two-arm directional coupler with S-bend fan-out.
    DirectionalCoupler,
    /// Flattened 90 degree bend.
    FlatBend,
}

impl ComponentKind {
    /// Prefix used for labels of this family.
    pub fn label_prefix(&self) -> &'static str {
        match self {
            ComponentKind::RingBus => "ring",
            ComponentKind::DirectionalCoupler => "dc",
            ComponentKind::FlatBend => "bend",
        }
    }

    /// Parameters that influence the emitted shapes, in label order.
    pub fn relevant_parameters(&self) -> &'static [ParameterName] {
        match self {
            ComponentKind::RingBus => &[
                ParameterName::Gap,
                ParameterName::RingRadius,
                ParameterName::RingWidth,
                ParameterName::WgWidth,
                ParameterName::BusOffset,
                ParameterName::Wavelength,
            ],
            ComponentKind::DirectionalCoupler => &[
                ParameterName::Gap,
                ParameterName::CouplingLength,
                ParameterName::WgWidth,
                ParameterName::Wavelength,
            ],
            ComponentKind::FlatBend => &[ParameterName::BendSize, ParameterName::Wavelength],
        }
    }

    /// Builds one component of this family.
    pub fn build(&self, config: &SimConfig, params: &ParameterSet) -> Result<Component, PicError> {
        match self {
            ComponentKind::RingBus => ring_bus_component(config, params),
            ComponentKind::DirectionalCoupler => build_directional_coupler(params),
            ComponentKind::FlatBend => build_flat_bend(params),
        }
    }
}

/// Waveguide terminal of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port name, e.g. `o1`.
    pub name: String,
    /// Centre of the terminal face.
    pub center: Vec2,
    /// Direction the port faces, in degrees counter-clockwise from +x.
    pub orientation: f64,
    /// Width of the terminating waveguide.
    pub width: f64,
}

impl Port {
    /// Creates a port.
    pub fn new(name: impl Into<String>, center: Vec2, orientation: f64, width: f64) -> Self {
        Self {
            name: name.into(),
            center,
            orientation,
            width,
        }
    }
}

/// Layout object built from one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique human readable name.
    pub label: String,
    /// Family the component belongs to.
    pub kind: ComponentKind,
    /// Parameters the component was built from.
    pub parameters: ParameterSet,
    /// Shapes in paint order.
    pub shapes: ShapeList,
    /// Named waveguide terminals.
    pub ports: Vec<Port>,
    /// Build metadata keyed by parameter name.
    pub info: BTreeMap<String, f64>,
    bbox: BBox,
}

impl Component {
    /// Assembles a component, deriving its bounds from the shapes.
    pub fn new(
        kind: ComponentKind,
        parameters: ParameterSet,
        shapes: ShapeList,
        ports: Vec<Port>,
    ) -> Result<Self, PicError> {
        let bbox = shapes.bbox().ok_or_else(|| {
            PicError::Geometry(
                ErrorInfo::new("empty-component", "component emitted no shapes")
                    .with_context("kind", kind.label_prefix()),
            )
        })?;
        let info = kind
            .relevant_parameters()
            .iter()
            .map(|name| (name.as_str().to_string(), parameters.get(*name)))
            .collect();
        Ok(Self {
            label: kind.label_prefix().to_string(),
            kind,
            parameters,
            shapes,
            ports,
            info,
            bbox,
        })
    }

    /// Returns the component renamed to `label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Bounding box of all shapes.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Looks up a port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|port| port.name == name)
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), PicError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PicError::Geometry(
            ErrorInfo::new("non-positive-dimension", format!("{name} must be finite and positive"))
                .with_context("parameter", name)
                .with_context("value", value),
        ))
    }
}
