use std::collections::BTreeMap;

use pic_core::{ErrorInfo, ParameterName, PicError};
use pic_geom::ComponentKind;
use serde::{Deserialize, Serialize};

use crate::label::LabelField;

/// Plan describing which component family to sweep and over which values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Component family built for every combination.
    pub component: ComponentKind,
    /// How combinations are enumerated.
    pub strategy: SweepStrategy,
    /// Fixed parameters appended to every label after the swept axes.
    #[serde(default)]
    pub label_extra: Vec<LabelField>,
}

/// Supported deterministic sweep strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SweepStrategy {
    /// Cartesian product of every axis; the first axis varies slowest.
    Grid {
        /// Swept axes in nesting order.
        parameters: Vec<SweepAxis>,
    },
    /// Explicit combinations, in the given order.
    List {
        /// Label layout shared by every point.
        parameters: Vec<LabelField>,
        /// One value map per combination.
        points: Vec<BTreeMap<ParameterName, f64>>,
    },
}

/// Grid axis descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    /// Parameter swept along this axis.
    pub name: ParameterName,
    /// Values in sweep order.
    pub values: Vec<f64>,
    /// Decimal places used in labels; defaults per parameter.
    #[serde(default)]
    pub precision: Option<u32>,
}

impl SweepPlan {
    /// Parses a plan from YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, PicError> {
        serde_yaml::from_str(text)
            .map_err(|err| PicError::Config(ErrorInfo::new("plan-parse", err.to_string())))
    }

    /// Label fields: swept axes first, then the fixed extras.
    pub fn label_fields(&self) -> Vec<LabelField> {
        let swept: Vec<LabelField> = match &self.strategy {
            SweepStrategy::Grid { parameters } => parameters
                .iter()
                .map(|axis| LabelField {
                    name: axis.name,
                    precision: axis.precision,
                })
                .collect(),
            SweepStrategy::List { parameters, .. } => parameters.clone(),
        };
        let mut fields = swept;
        for extra in &self.label_extra {
            if !fields.iter().any(|field| field.name == extra.name) {
                fields.push(extra.clone());
            }
        }
        fields
    }

    /// Enumerates raw combinations in deterministic order.
    pub fn combinations(&self) -> Result<Vec<BTreeMap<ParameterName, f64>>, PicError> {
        match &self.strategy {
            SweepStrategy::Grid { parameters } => {
                let mut seen = Vec::with_capacity(parameters.len());
                for axis in parameters {
                    if seen.contains(&axis.name) {
                        return Err(PicError::Config(
                            ErrorInfo::new("duplicate-axis", "parameter swept on two axes")
                                .with_context("parameter", axis.name),
                        ));
                    }
                    if axis.values.is_empty() {
                        return Err(PicError::Config(
                            ErrorInfo::new("empty-axis", "sweep axis has no values")
                                .with_context("parameter", axis.name),
                        ));
                    }
                    seen.push(axis.name);
                }
                let mut outputs = Vec::new();
                expand_grid(parameters, 0, BTreeMap::new(), &mut outputs);
                Ok(outputs)
            }
            SweepStrategy::List { parameters, points } => {
                for (idx, point) in points.iter().enumerate() {
                    if let Some(missing) = parameters.iter().find(|f| !point.contains_key(&f.name)) {
                        return Err(PicError::Config(
                            ErrorInfo::new("incomplete-point", "sweep point misses a label parameter")
                                .with_context("point", idx)
                                .with_context("parameter", missing.name),
                        ));
                    }
                }
                Ok(points.clone())
            }
        }
    }
}

fn expand_grid(
    params: &[SweepAxis],
    idx: usize,
    current: BTreeMap<ParameterName, f64>,
    outputs: &mut Vec<BTreeMap<ParameterName, f64>>,
) {
    if idx == params.len() {
        outputs.push(current);
        return;
    }
    let axis = &params[idx];
    for value in &axis.values {
        let mut next = current.clone();
        next.insert(axis.name, *value);
        expand_grid(params, idx + 1, next, outputs);
    }
}
