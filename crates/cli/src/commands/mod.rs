//! CLI command implementations.

pub mod export;
pub mod get;
pub mod show;

use anyhow::Result;
use std::io::Write;

use crate::args::{Cli, Commands};
use crate::error::CliError;

/// Load the configuration and run the selected command, writing to `out`.
pub fn run_command(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = enx_config::load(cli.load_options()).map_err(CliError::from)?;

    match &cli.command {
        Commands::Show { compact } => show::run(&config, *compact, out),
        Commands::Get { path } => get::run(&config, path, out),
        Commands::Export { leaves_only } => export::run(&config, *leaves_only, out),
    }
}
