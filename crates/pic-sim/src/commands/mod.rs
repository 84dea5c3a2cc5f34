use std::error::Error;
use std::fs;
use std::path::Path;

use pic_core::{to_canonical_json_pretty, SimConfig};
use serde::Serialize;

pub mod budget;
pub mod pack;
pub mod setup;
pub mod show;
pub mod version;

/// Loads the run configuration, falling back to the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<SimConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(SimConfig::load(path)?),
        None => Ok(SimConfig::default()),
    }
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut text = to_canonical_json_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
