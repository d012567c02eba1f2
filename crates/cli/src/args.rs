//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate global flags into `LoadOptions`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Parser, Subcommand};
use enx_config::LoadOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "enx")]
#[command(about = "Load layered environment configuration and print it", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  enx show\n  enx --env production get db.host\n  eval \"$(enx -e staging export)\"\n"
)]
pub struct Cli {
    /// Environment name selecting the override file (e.g. production)
    #[arg(short, long, global = true, env = "ENX_ENV")]
    pub env: Option<String>,

    /// File name template containing ${env}
    #[arg(short, long, global = true, value_name = "TEMPLATE")]
    pub file_name: Option<String>,

    /// Directory against which relative file names are resolved
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Layer live environment variables over file values
    #[arg(long, global = true)]
    pub merge_process_env: bool,

    /// Only layer environment variables starting with this prefix (implies --merge-process-env)
    #[arg(long, global = true, value_name = "PREFIX")]
    pub env_prefix: Option<String>,

    /// Print loader diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged configuration as JSON
    Show {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print a single value by dotted path (e.g. db.host)
    Get {
        /// Dotted path to the value
        path: String,
    },

    /// Print flattened variables as shell assignments
    Export {
        /// Omit the JSON entries for nested objects
        #[arg(long)]
        leaves_only: bool,
    },
}

impl Cli {
    /// Load options for this invocation. The CLI never writes its own environment.
    pub fn load_options(&self) -> LoadOptions {
        let mut options = LoadOptions::new()
            .with_inject_to_process(false)
            .with_merge_process_env(self.merge_process_env || self.env_prefix.is_some())
            .with_debug(self.debug);

        if let Some(env) = &self.env {
            options = options.with_env_name(env.clone());
        }
        if let Some(file_name) = self.file_name.as_deref().filter(|f| !f.trim().is_empty()) {
            options = options.with_file_name(file_name);
        }
        if let Some(cwd) = &self.cwd {
            options = options.with_cwd(cwd.clone());
        }
        if let Some(prefix) = &self.env_prefix {
            options = options.with_process_env_prefix(prefix.clone());
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "enx",
            "get",
            "db.host",
            "--env",
            "production",
            "-C",
            "/srv/app",
            "--env-prefix",
            "APP_",
        ])
        .unwrap();

        assert_eq!(cli.env.as_deref(), Some("production"));
        assert_eq!(cli.cwd, Some(PathBuf::from("/srv/app")));
        assert_eq!(cli.env_prefix.as_deref(), Some("APP_"));
        assert!(matches!(cli.command, Commands::Get { ref path } if path == "db.host"));
    }
}
