use pic_core::{ErrorInfo, ParameterName, ParameterSet, PicError};
use serde::{Deserialize, Serialize};

/// One labelled parameter and its fixed decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelField {
    /// Parameter encoded in the label.
    pub name: ParameterName,
    /// Decimal places; `None` uses [`default_precision`].
    #[serde(default)]
    pub precision: Option<u32>,
}

impl LabelField {
    /// Precision actually applied.
    pub fn resolved_precision(&self) -> u32 {
        self.precision.unwrap_or_else(|| default_precision(self.name))
    }
}

/// Default label precision per parameter.
pub fn default_precision(name: ParameterName) -> u32 {
    match name {
        ParameterName::CouplingLength => 1,
        ParameterName::RingRadius | ParameterName::BusOffset => 3,
        ParameterName::Gap
        | ParameterName::WgWidth
        | ParameterName::Wavelength
        | ParameterName::RingWidth
        | ParameterName::BendSize => 2,
    }
}

const MAX_PRECISION: u32 = 9;

/// Quantized identity of a parameter tuple.
///
/// Two tuples share a key exactly when they share a label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LabelKey {
    fields: Vec<(ParameterName, u32, i64)>,
}

impl LabelKey {
    /// Rounds every labelled parameter of `params` to its field precision.
    pub fn quantize(
        fields: &[LabelField],
        params: &ParameterSet,
    ) -> Result<Self, PicError> {
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let precision = field.resolved_precision();
            if precision > MAX_PRECISION {
                return Err(PicError::Config(
                    ErrorInfo::new("precision-too-high", "label precision exceeds 9 decimals")
                        .with_context("parameter", field.name)
                        .with_context("precision", precision),
                ));
            }
            let value = params.get(field.name);
            let scaled = (value * 10f64.powi(precision as i32)).round();
            if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
                return Err(PicError::Config(
                    ErrorInfo::new("unlabelable-value", "parameter value cannot be labelled")
                        .with_context("parameter", field.name)
                        .with_context("value", value),
                ));
            }
            out.push((field.name, precision, scaled as i64));
        }
        Ok(Self { fields: out })
    }

    /// Renders `<prefix>_<tag><value>_...`, e.g. `dc_gap0.15_Lc10.0`.
    pub fn render(&self, prefix: &str) -> String {
        let mut label = prefix.to_string();
        for (name, precision, q) in &self.fields {
            label.push('_');
            label.push_str(name.label_tag());
            label.push_str(&format_quantized(*q, *precision));
        }
        label
    }
}

/// Formats `q / 10^precision` with exactly `precision` decimals.
///
/// Works on the integer; a quantized zero is rendered without a sign.
pub fn format_quantized(q: i64, precision: u32) -> String {
    let sign = if q < 0 { "-" } else { "" };
    let magnitude = q.unsigned_abs();
    if precision == 0 {
        return format!("{sign}{magnitude}");
    }
    let scale = 10u64.pow(precision);
    format!(
        "{sign}{}.{:0width$}",
        magnitude / scale,
        magnitude % scale,
        width = precision as usize
    )
}
