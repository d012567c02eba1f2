//! Configuration file parsers.
//!
//! Responsibilities:
//! - Parse JSON, key=value (`.env`) and executable-module files into a `ConfigTree`.
//! - Pick the parser for a path purely from its file name.
//!
//! Does NOT handle:
//! - Choosing between candidate files on disk (see `resolver.rs`).
//! - Merging parsed trees (see `merge.rs`).
//!
//! Invariants:
//! - Parsers never fail: read and syntax errors are logged (debug only) and
//!   produce an empty tree.
//! - Dispatch priority is `.json` > module extension > `.env` marker; any other
//!   file name is a fatal `ConfigError::UnsupportedFileType`.

pub mod dotenv;
pub mod json;
pub mod module;

use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::constants::{DOTENV_MARKER, JSON_EXTENSION, MODULE_EXTENSIONS};
use crate::error::{ConfigError, ParseError};
use crate::log::DebugLog;
use crate::tree::ConfigTree;

pub use module::{ModuleEvaluator, NodeEvaluator};

/// Collaborators shared by every parser during a load.
#[derive(Clone)]
pub struct ParseContext {
    pub log: DebugLog,
    pub evaluator: Arc<dyn ModuleEvaluator>,
}

impl ParseContext {
    pub fn new(log: DebugLog, evaluator: Arc<dyn ModuleEvaluator>) -> Self {
        Self { log, evaluator }
    }
}

impl Default for ParseContext {
    /// Silent logging and the `node` evaluator.
    fn default() -> Self {
        Self {
            log: DebugLog::disabled(),
            evaluator: Arc::new(NodeEvaluator::default()),
        }
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Structured data (`*.json`).
    Json,
    /// Executable module (`*.js`, `*.cjs`, `*.mjs`).
    Module,
    /// Key=value lines (file name starting with `.env`).
    Dotenv,
}

impl FileFormat {
    /// Detect the format of `path` from its file name alone.
    pub fn detect(path: &Path) -> Option<Self> {
        let raw = path.to_string_lossy();

        if raw.ends_with(JSON_EXTENSION) {
            return Some(Self::Json);
        }
        if MODULE_EXTENSIONS.iter().any(|ext| raw.ends_with(ext)) {
            return Some(Self::Module);
        }

        let file_name = path.file_name()?.to_string_lossy();
        if file_name.starts_with(DOTENV_MARKER) {
            return Some(Self::Dotenv);
        }

        None
    }
}

/// Parse a single file with the parser matching its name.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedFileType` when the file name matches no
/// known format. Missing or malformed files are not errors.
pub fn parse_config_file(path: &Path, ctx: &ParseContext) -> Result<ConfigTree, ConfigError> {
    let format = FileFormat::detect(path).ok_or_else(|| ConfigError::UnsupportedFileType {
        path: path.to_path_buf(),
    })?;

    let tree = match format {
        FileFormat::Json => json::parse_json_file(path, &ctx.log),
        FileFormat::Module => module::parse_module_file(path, ctx),
        FileFormat::Dotenv => dotenv::parse_dotenv_file(path, &ctx.log),
    };

    Ok(tree)
}

/// Log why `parser` produced an empty tree for `path`.
///
/// A missing file is expected for optional layers and gets a one-line notice;
/// any other failure is logged with its full source chain.
pub(crate) fn log_parse_failure(log: &DebugLog, parser: &str, path: &Path, error: &ParseError) {
    if error.is_not_found() {
        log.log(parser, format_args!("no file at {}, skipping", path.display()));
    } else {
        log.log_error(&format!("error in {parser}({})", path.display()), error);
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
