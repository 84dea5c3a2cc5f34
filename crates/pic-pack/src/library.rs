use std::collections::BTreeMap;

use pic_core::{stable_hash_string, ErrorInfo, ParameterName, PicError, SimConfig, Vec2};
use pic_geom::Component;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::label::LabelKey;
use crate::pack::{pack, PackedLayout};
use crate::plan::SweepPlan;

/// Outcome of expanding, building and packing a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Stable hash of the plan and the configuration it was resolved against.
    pub plan_hash: String,
    /// Number of combinations the plan enumerated.
    pub combinations: usize,
    /// Labels of combinations dropped as exact duplicates of earlier ones.
    pub duplicates: Vec<String>,
    /// Packed, uniquely labelled components.
    pub layout: PackedLayout,
}

/// Builds one component per distinct combination and packs them.
///
/// Components are built from the requested values; only the label is
/// rounded to each field's precision. A repeated combination is built once;
/// two different raw combinations that round to the same label are a
/// [`PicError::Packing`] with code `label-collision`.
pub fn build_library(plan: &SweepPlan, config: &SimConfig) -> Result<Library, PicError> {
    let plan_hash = stable_hash_string(&(plan, config))?;
    let fields = plan.label_fields();
    let combinations = plan.combinations()?;
    let prefix = plan.component.label_prefix();
    let base = config.base_parameters();

    let mut seen: BTreeMap<String, BTreeMap<ParameterName, f64>> = BTreeMap::new();
    let mut duplicates = Vec::new();
    let mut components: Vec<Component> = Vec::with_capacity(combinations.len());
    for (idx, raw) in combinations.iter().enumerate() {
        if let Some(name) = raw.keys().find(|name| !fields.iter().any(|f| f.name == **name)) {
            return Err(PicError::Config(
                ErrorInfo::new("unlabelled-parameter", "swept parameter is missing from the label")
                    .with_context("parameter", name)
                    .with_context("combination", idx),
            ));
        }
        let params = raw
            .iter()
            .fold(base, |acc, (name, value)| acc.with(*name, *value));
        let key = LabelKey::quantize(&fields, &params)?;
        let label = key.render(prefix);
        if let Some(previous) = seen.get(&label) {
            if previous == raw {
                debug!(%label, "skipping duplicate combination");
                duplicates.push(label);
                continue;
            }
            return Err(PicError::Packing(
                ErrorInfo::new("label-collision", "distinct combinations share a label")
                    .with_context("label", &label)
                    .with_context("combination", idx)
                    .with_hint("raise the label precision of the colliding axis"),
            ));
        }
        let component = plan
            .component
            .build(config, &params)
            .map_err(|err| with_label_context(err, &label))?
            .with_label(label.clone());
        seen.insert(label, raw.clone());
        components.push(component);
    }

    let [width, height] = config.packing.max_tile_size;
    let layout = pack(components, Vec2::new(width, height), config.packing.spacing)?;
    layout.verify()?;
    info!(
        components = layout.len(),
        tiles = layout.tiles.len(),
        duplicates = duplicates.len(),
        "packed sweep library"
    );
    Ok(Library {
        plan_hash,
        combinations: combinations.len(),
        duplicates,
        layout,
    })
}

fn with_label_context(err: PicError, label: &str) -> PicError {
    match err {
        PicError::Geometry(info) => PicError::Geometry(info.with_context("label", label)),
        other => other,
    }
}
