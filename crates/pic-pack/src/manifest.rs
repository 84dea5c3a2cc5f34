use pic_core::{
    stable_hash_string, ParameterSet, PicError, RunProvenance, SchemaVersion, SimConfig, Vec2,
};
use serde::{Deserialize, Serialize};

use crate::library::Library;
use crate::pack::PackedLayout;

/// Persisted form of a packed library.
///
/// Stands in for the external layout file: it lists exactly the shapes the
/// builders emitted, placed where the packer put them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutManifest {
    /// Schema of this document.
    pub schema_version: SchemaVersion,
    /// Name of the top-level cell.
    pub top: String,
    /// Hashes tying the layout to its plan and configuration.
    pub provenance: RunProvenance,
    /// The packed layout.
    pub layout: PackedLayout,
}

impl LayoutManifest {
    /// Wraps a library for persistence.
    pub fn new(top: impl Into<String>, library: &Library, config: &SimConfig) -> Result<Self, PicError> {
        Ok(Self {
            schema_version: SchemaVersion::default(),
            top: top.into(),
            provenance: RunProvenance::new(&library.plan_hash, stable_hash_string(config)?),
            layout: library.layout.clone(),
        })
    }

    /// Stable hash of the packed geometry.
    pub fn layout_hash(&self) -> Result<String, PicError> {
        stable_hash_string(&self.layout)
    }
}

/// Row of the sweep index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    /// Component label.
    pub label: String,
    /// Tile holding the component.
    pub tile: usize,
    /// Lower-left corner of the placed bounds.
    pub origin: Vec2,
    /// Width and height of the placed bounds.
    pub size: Vec2,
    /// Parameters the component was built from.
    pub parameters: ParameterSet,
}

/// Aggregate sweep report persisted for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Hash of plan and configuration.
    pub plan_hash: String,
    /// Hash of the packed layout.
    pub layout_hash: String,
    /// Combinations enumerated by the plan.
    pub combinations: usize,
    /// Labels of skipped duplicates.
    pub duplicates: Vec<String>,
    /// One entry per placed component, in packing order.
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    /// Summarises a library.
    pub fn from_library(library: &Library) -> Result<Self, PicError> {
        let entries = library
            .layout
            .placements()
            .map(|(tile, placement)| SweepEntry {
                label: placement.component.label.clone(),
                tile: tile.index,
                origin: placement.bbox.min,
                size: placement.bbox.size(),
                parameters: placement.component.parameters,
            })
            .collect();
        Ok(Self {
            plan_hash: library.plan_hash.clone(),
            layout_hash: stable_hash_string(&library.layout)?,
            combinations: library.combinations,
            duplicates: library.duplicates.clone(),
            entries,
        })
    }
}
