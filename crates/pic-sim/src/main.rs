use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    budget::{self, BudgetArgs},
    pack::{self, PackArgs},
    setup::{self, SetupArgs},
    show::{self, ShowArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "pic-sim", about = "Photonic component sweeps, solver setups and power budgets")]
struct Cli {
    /// Log filter applied when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a sweep plan, build every component and pack the gallery.
    Pack(PackArgs),
    /// Write the device and control run setups for the external solver.
    Setup(SetupArgs),
    /// Evaluate recorded device and control fluxes into a power budget.
    Budget(BudgetArgs),
    /// Push a written layout to the live viewer.
    Show(ShowArgs),
    /// Print the toolkit version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match cli.command {
        Command::Pack(args) => pack::run(&args),
        Command::Setup(args) => setup::run(&args),
        Command::Budget(args) => budget::run(&args),
        Command::Show(args) => show::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
