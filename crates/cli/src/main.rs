//! enx - print layered environment configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load the merged configuration via `enx-config`.
//! - Print it as JSON, a single value, or shell `export` lines.
//!
//! Invariants:
//! - Logging goes to stderr so stdout stays machine-readable.
//! - The CLI never injects configuration into its own environment.

mod args;
mod commands;
mod error;

use args::Cli;
use clap::Parser;
use commands::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let default_directive = if cli.debug { "warn,enx_config=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut stdout = std::io::stdout().lock();
    let exit_code = match run_command(&cli, &mut stdout) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
