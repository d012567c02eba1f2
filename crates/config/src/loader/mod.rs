//! Layered configuration loader.
//!
//! Responsibilities:
//! - Resolve the base and environment-specific files from a name template.
//! - Parse, merge, and optionally inject the result into the environment.
//! - Optionally layer live environment variables on top of file values.
//! - Cache the merged tree so later loads are free of side effects.
//!
//! Does NOT handle:
//! - Parsing individual formats (see `parsers`).
//! - Merge and flatten rules (see `merge.rs` and `flatten.rs`).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest to highest: base file, env file, live environment.
//! - Live variables are captured before injection, so injected values never
//!   count as live ones.
//! - A cached tree is returned as the same `Arc` without reading any file.

mod cache;
mod options;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::constants::{ENV_NAME_VAR, ENV_PLACEHOLDER, ENV_SEPARATOR, FALLBACK_ENV_NAME_VAR};
use crate::env::env_var_or_none;
use crate::error::ConfigError;
use crate::flatten::{flatten, tree_from_env};
use crate::log::DebugLog;
use crate::merge::merge_into;
use crate::parsers::{NodeEvaluator, ParseContext, parse_config_file};
use crate::resolver::resolve_and_parse;
use crate::tree::ConfigTree;

pub use cache::ConfigCache;
pub use options::LoadOptions;

/// Load the layered configuration, or return the cached result.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedFileType` when the file name template maps
/// to no known format, and `ConfigError::WorkingDirUnavailable` when no `cwd`
/// was given and the current directory cannot be read. Missing or malformed
/// files are not errors; they contribute an empty tree.
pub fn load(options: LoadOptions) -> Result<Arc<ConfigTree>, ConfigError> {
    let log = options.debug_log();
    let cache = options.cache();

    cache.get_or_try_init(
        || log.log("enx", "already loaded"),
        || load_uncached(&options, &log),
    )
}

fn load_uncached(options: &LoadOptions, log: &DebugLog) -> Result<ConfigTree, ConfigError> {
    let provider = options.env_provider.as_ref();
    let cwd = match &options.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().map_err(ConfigError::WorkingDirUnavailable)?,
    };

    let evaluator = options
        .module_evaluator
        .clone()
        .unwrap_or_else(|| Arc::new(NodeEvaluator::from_env(provider)));
    let ctx = ParseContext::new(log.clone(), evaluator);
    let parse = |path: &Path| {
        if options.is_default_file_name() {
            resolve_and_parse(path, &ctx)
        } else {
            parse_config_file(path, &ctx)
        }
    };

    let mut merged = parse(&base_path(&cwd, options.file_name()))?;
    if log.is_enabled() {
        log.log("vars", Value::Object(merged.clone()));
    }

    match resolve_env_name(options) {
        Some(env_name) => {
            let env_tree = parse(&env_path(&cwd, options.file_name(), &env_name))?;
            if log.is_enabled() {
                log.log("envVars", Value::Object(env_tree.clone()));
            }
            merge_into(&mut merged, &env_tree);
        }
        None => log.log(
            "envVars",
            "no environment name set, skipping environment-specific file",
        ),
    }

    let live = options
        .merge_process_env
        .then(|| tree_from_env(provider, options.process_env_prefix.as_deref()));

    if options.inject_to_process {
        let vars = flatten(&merged, ENV_SEPARATOR);
        log.log("inject", format_args!("{} variables", vars.len()));
        for (key, value) in &vars {
            provider.set_var(key, value);
        }
    }

    if let Some(live) = live {
        merge_into(&mut merged, &live);
    }

    Ok(merged)
}

fn resolve_env_name(options: &LoadOptions) -> Option<String> {
    let provider = options.env_provider.as_ref();
    options
        .env_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| env_var_or_none(provider, ENV_NAME_VAR))
        .or_else(|| env_var_or_none(provider, FALLBACK_ENV_NAME_VAR))
}

/// Base file: the template with its `.${env}` segment removed.
fn base_path(cwd: &Path, file_name: &str) -> PathBuf {
    let segment = format!(".{ENV_PLACEHOLDER}");
    cwd.join(file_name.replacen(&segment, "", 1))
}

/// Environment file: the template with `${env}` replaced by `env_name`.
fn env_path(cwd: &Path, file_name: &str, env_name: &str) -> PathBuf {
    cwd.join(file_name.replacen(ENV_PLACEHOLDER, env_name, 1))
}
