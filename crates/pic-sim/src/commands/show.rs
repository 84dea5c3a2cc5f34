use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pic_core::PathStyle;
use pic_live::LiveClient;

use super::load_config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Layout file to open in the viewer.
    #[arg(long)]
    pub layout: PathBuf,
    /// Optional YAML run configuration supplying the `live` section.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Viewer host, overriding the configuration.
    #[arg(long)]
    pub host: Option<String>,
    /// Viewer port, overriding the configuration.
    #[arg(long)]
    pub port: Option<u16>,
    /// Translate the path with `wslpath -w` before sending.
    #[arg(long)]
    pub wsl: bool,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let mut live = load_config(args.config.as_deref())?.live;
    if let Some(host) = &args.host {
        live.host = host.clone();
    }
    if let Some(port) = args.port {
        live.port = port;
    }
    if args.wsl {
        live.path_style = PathStyle::Wsl;
    }
    let report = LiveClient::new(&live).push(&args.layout)?;
    println!("sent {} to {}", report.remote_path, report.peer);
    Ok(())
}
