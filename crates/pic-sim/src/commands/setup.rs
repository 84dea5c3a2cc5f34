use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use pic_flux::RunSetup;
use tracing::info;

use super::{load_config, write_json};

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Optional YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for `device_setup.json` and `control_setup.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &SetupArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(args.config.as_deref())?;
    let device = RunSetup::device(&config)?;
    let control = RunSetup::control(&config)?;
    let settings_hash = device.settings_hash()?;
    write_json(&args.out.join("device_setup.json"), &device)?;
    write_json(&args.out.join("control_setup.json"), &control)?;
    info!(settings_hash = settings_hash.as_str(), out = %args.out.display(), "wrote run setups");
    Ok(())
}
