use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use pic_flux::{simulate_budget, FluxRecord, RecordedSolver};

use super::{load_config, write_json};

#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Optional YAML run configuration used for both setups.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Flux record of the device run.
    #[arg(long)]
    pub device: PathBuf,
    /// Flux record of the cladding-only control run.
    #[arg(long)]
    pub control: PathBuf,
    /// Output directory for `summary.txt` and `budget.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &BudgetArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(args.config.as_deref())?;
    let solver = RecordedSolver::new(FluxRecord::load(&args.device)?, FluxRecord::load(&args.control)?);
    let budget = simulate_budget(&solver, &config)?;

    let summary = budget.summary(&config);
    fs::write(args.out.join("summary.txt"), &summary)?;
    write_json(&args.out.join("budget.json"), &budget)?;
    print!("{summary}");
    Ok(())
}
