use anyhow::Result;
use clap::Parser;

use dockspace::cli::{run, CliArgs};
use dockspace::config::EngineConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    dockspace::tracing::init(args.verbose);

    let config = EngineConfig::load();
    let output = run(args.command, config)?;
    println!("{}", output.trim_end());

    Ok(())
}
