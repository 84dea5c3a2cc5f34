use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pic_core::to_canonical_json_bytes;
use pic_pack::{build_library, LayoutManifest, SweepPlan, SweepReport};
use tracing::info;

use super::{load_config, write_json};

#[derive(Args, Debug)]
pub struct PackArgs {
    /// YAML sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// Optional YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for the layout and its index.
    #[arg(long)]
    pub out: PathBuf,
    /// Name of the top-level cell.
    #[arg(long, default_value = "sweep")]
    pub top: String,
}

pub fn run(args: &PackArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(args.config.as_deref())?;
    let plan = SweepPlan::from_yaml_str(&fs::read_to_string(&args.plan)?)?;

    let library = build_library(&plan, &config)?;
    let manifest = LayoutManifest::new(&args.top, &library, &config)?;
    let report = SweepReport::from_library(&library)?;

    write_json(&args.out.join("layout.json"), &manifest)?;
    fs::write(args.out.join("sweep_report.json"), to_canonical_json_bytes(&report)?)?;
    write_labels(&args.out.join("labels.csv"), &report)?;
    info!(
        components = report.entries.len(),
        duplicates = report.duplicates.len(),
        tiles = library.layout.tiles.len(),
        out = %args.out.display(),
        "wrote sweep layout"
    );
    Ok(())
}

fn write_labels(path: &Path, report: &SweepReport) -> Result<(), Box<dyn Error>> {
    let mut file = csv::Writer::from_path(path)?;
    file.write_record(["label", "tile", "x", "y", "width", "height"])?;
    for entry in &report.entries {
        file.write_record([
            entry.label.clone(),
            entry.tile.to_string(),
            format!("{:.4}", entry.origin.x),
            format!("{:.4}", entry.origin.y),
            format!("{:.4}", entry.size.x),
            format!("{:.4}", entry.size.y),
        ])?;
    }
    file.flush()?;
    Ok(())
}
