//! Provenance and schema descriptors shared across PIC artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every persisted artifact.
///
/// Carries no timestamp; regenerating an artifact yields identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Hash of the sweep plan or run setup that produced the artifact.
    pub input_hash: String,
    /// Hash of the configuration the run was constructed from.
    pub config_hash: String,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Provenance stamped with this crate's version.
    pub fn new(input_hash: impl Into<String>, config_hash: impl Into<String>) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert("pic-core".to_string(), env!("CARGO_PKG_VERSION").to_string());
        Self {
            input_hash: input_hash.into(),
            config_hash: config_hash.into(),
            tool_versions,
        }
    }
}
