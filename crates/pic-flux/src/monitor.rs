use pic_core::{BBox, ErrorInfo, PicError, Vec2};
use serde::{Deserialize, Serialize};

/// Names of the monitors in a ring/bus set, in placement order.
pub const MONITOR_NAMES: [&str; 5] = ["wg", "left", "right", "top", "bottom"];

// Absorbs rounding in the half-extent arithmetic.
const CLEARANCE_EPS: f64 = 1e-9;

/// Cartesian axis a monitor integrates flux along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// What a monitor contributes to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorRole {
    /// Cut across the output waveguide; numerator of β.
    Waveguide,
    /// One side of the closed boundary around the source.
    Boundary {
        /// Coefficient of this side's reading in the net outward power.
        net_sign: f64,
    },
}

/// Flux measurement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxMonitor {
    /// Monitor name.
    pub name: String,
    /// Centre of the line.
    pub center: Vec2,
    /// Extent; one component is always zero.
    pub size: Vec2,
    /// Axis the solver integrates the Poynting flux along.
    pub flux_axis: Axis,
    /// Unit vector pointing away from the enclosed source.
    pub outward_normal: Vec2,
    /// Budget role and sign.
    pub role: MonitorRole,
    /// Centre frequency in 1/µm.
    pub frequency: f64,
    /// Frequency span; zero records only the centre frequency.
    pub bandwidth: f64,
    /// Number of frequency samples.
    pub samples: u32,
}

impl FluxMonitor {
    /// Bounds of the measurement line.
    pub fn bbox(&self) -> BBox {
        BBox::from_center(self.center, self.size)
    }
}

/// Cross-section of the output waveguide monitored for coupled power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveguideCut {
    /// Vertical position of the waveguide centre line.
    pub y: f64,
    /// Waveguide width; the monitor spans 1.5 times this.
    pub width: f64,
}

/// Named monitors of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSet {
    monitors: Vec<FluxMonitor>,
}

impl MonitorSet {
    /// Looks up a monitor by name.
    pub fn get(&self, name: &str) -> Option<&FluxMonitor> {
        self.monitors.iter().find(|monitor| monitor.name == name)
    }

    /// All monitors in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &FluxMonitor> {
        self.monitors.iter()
    }

    /// Boundary monitors with their net-power coefficients.
    pub fn boundary(&self) -> impl Iterator<Item = (&FluxMonitor, f64)> {
        self.monitors.iter().filter_map(|monitor| match monitor.role {
            MonitorRole::Boundary { net_sign } => Some((monitor, net_sign)),
            MonitorRole::Waveguide => None,
        })
    }

    /// The waveguide monitor, if the set has one.
    pub fn waveguide(&self) -> Option<&FluxMonitor> {
        self.monitors
            .iter()
            .find(|monitor| monitor.role == MonitorRole::Waveguide)
    }

    /// Checks that every monitor keeps `clearance` from the domain edge.
    pub fn verify_clearance(&self, domain: Vec2, clearance: f64) -> Result<(), PicError> {
        let interior = BBox::from_center(Vec2::ZERO, domain).expand(-clearance);
        for monitor in &self.monitors {
            if !interior.contains_box(&monitor.bbox()) {
                return Err(PicError::Geometry(
                    ErrorInfo::new("monitor-clearance", "monitor reaches into the absorbing boundary")
                        .with_context("monitor", &monitor.name)
                        .with_context("clearance", clearance),
                ));
            }
        }
        Ok(())
    }
}

/// Places the waveguide cut and the four boundary lines of a centred domain.
///
/// Boundary lines sit `boundary_margin + edge_offset` inside the domain edge,
/// forming a closed rectangle around the source. Readings are expected
/// pre-oriented outward on each side; the net power adds the left and right
/// readings and subtracts the top and bottom ones.
pub fn place_monitors(
    domain: Vec2,
    boundary_margin: f64,
    edge_offset: f64,
    waveguide: WaveguideCut,
    frequency: f64,
) -> Result<MonitorSet, PicError> {
    if !(boundary_margin.is_finite() && boundary_margin >= 0.0) {
        return Err(clearance_error(
            "boundary margin must be finite and non-negative",
            "boundary_margin",
            boundary_margin,
        ));
    }
    if !(edge_offset.is_finite() && edge_offset > 0.0) {
        return Err(clearance_error("edge offset must be positive", "edge_offset", edge_offset));
    }
    let half_x = 0.5 * domain.x - boundary_margin - edge_offset;
    let half_y = 0.5 * domain.y - boundary_margin - edge_offset;
    if !(half_x > 0.0 && half_y > 0.0) {
        return Err(clearance_error(
            "domain leaves no interior inside the boundary",
            "domain",
            format!("{}x{}", domain.x, domain.y),
        ));
    }
    let wg_span = 1.5 * waveguide.width;
    if !(waveguide.width > 0.0 && waveguide.y.abs() + wg_span / 2.0 < half_y) {
        return Err(clearance_error(
            "waveguide cut leaves the monitored interior",
            "waveguide_y",
            waveguide.y,
        ));
    }

    let line = |name: &str, center, size, flux_axis, outward_normal, role| FluxMonitor {
        name: name.to_string(),
        center,
        size,
        flux_axis,
        outward_normal,
        role,
        frequency,
        bandwidth: 0.0,
        samples: 1,
    };
    let sideways = MonitorRole::Boundary { net_sign: 1.0 };
    let vertical = MonitorRole::Boundary { net_sign: -1.0 };
    let monitors = vec![
        line(
            "wg",
            Vec2::new(half_x, waveguide.y),
            Vec2::new(0.0, wg_span),
            Axis::X,
            Vec2::new(1.0, 0.0),
            MonitorRole::Waveguide,
        ),
        line(
            "left",
            Vec2::new(-half_x, 0.0),
            Vec2::new(0.0, 2.0 * half_y),
            Axis::X,
            Vec2::new(-1.0, 0.0),
            sideways,
        ),
        line(
            "right",
            Vec2::new(half_x, 0.0),
            Vec2::new(0.0, 2.0 * half_y),
            Axis::X,
            Vec2::new(1.0, 0.0),
            sideways,
        ),
        line(
            "top",
            Vec2::new(0.0, half_y),
            Vec2::new(2.0 * half_x, 0.0),
            Axis::Y,
            Vec2::new(0.0, 1.0),
            vertical,
        ),
        line(
            "bottom",
            Vec2::new(0.0, -half_y),
            Vec2::new(2.0 * half_x, 0.0),
            Axis::Y,
            Vec2::new(0.0, -1.0),
            vertical,
        ),
    ];
    let set = MonitorSet { monitors };
    set.verify_clearance(domain, boundary_margin + edge_offset - CLEARANCE_EPS)?;
    Ok(set)
}

fn clearance_error(message: &str, key: &str, value: impl ToString) -> PicError {
    PicError::Geometry(ErrorInfo::new("monitor-clearance", message).with_context(key, value))
}
