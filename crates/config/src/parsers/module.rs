//! Executable-module parser.
//!
//! Responsibilities:
//! - Evaluate a module file through a pluggable `ModuleEvaluator`.
//! - Require the evaluated module to produce an object.
//! - Provide `NodeEvaluator`, which runs a JavaScript interpreter and reads
//!   the module's export back as JSON.
//!
//! Invariants:
//! - The evaluator always receives an absolute path.
//! - Any evaluation failure is logged (debug only) and yields an empty tree.

use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{ParseContext, json_type_name, log_parse_failure};
use crate::constants::{DEFAULT_NODE_BIN, NODE_BIN_VAR};
use crate::env::{EnvProvider, env_var_or_none};
use crate::error::ParseError;
use crate::tree::ConfigTree;

/// Capability turning a module file into a value.
pub trait ModuleEvaluator: Send + Sync {
    /// Evaluate the module at `path` (absolute) and return what it produces.
    fn evaluate(&self, path: &Path) -> Result<Value, ParseError>;
}

/// Script run by the interpreter: import the module and report its export.
///
/// Anything the module writes to stdout is sent to stderr so the report is the
/// only thing on stdout. `import()` loads both CommonJS and ES modules; a
/// CommonJS export arrives as the namespace's `default`.
const NODE_SCRIPT: &str = r#"
const { pathToFileURL } = require("url");
const report = process.stdout.write.bind(process.stdout);
process.stdout.write = process.stderr.write.bind(process.stderr);
import(pathToFileURL(process.argv[1]).href)
  .then((ns) => {
    const exported = "default" in ns ? ns.default : ns;
    const type = exported === null ? "null" : Array.isArray(exported) ? "array" : typeof exported;
    report(JSON.stringify({ type, value: type === "object" ? exported : null }));
  })
  .catch((err) => {
    process.stderr.write(String((err && err.stack) || err) + "\n");
    process.exitCode = 1;
  });
"#;

/// Evaluates modules by running `node -e <script> <path>`.
#[derive(Debug, Clone)]
pub struct NodeEvaluator {
    program: OsString,
}

impl Default for NodeEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_BIN)
    }
}

impl NodeEvaluator {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use the interpreter named by `ENX_NODE_BIN`, falling back to `node`.
    pub fn from_env(provider: &dyn EnvProvider) -> Self {
        env_var_or_none(provider, NODE_BIN_VAR)
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }
}

impl ModuleEvaluator for NodeEvaluator {
    fn evaluate(&self, path: &Path) -> Result<Value, ParseError> {
        let evaluation_error = |message: String| ParseError::ModuleEvaluation {
            path: path.to_path_buf(),
            message,
        };

        let output = Command::new(&self.program)
            .arg("-e")
            .arg(NODE_SCRIPT)
            .arg(path)
            .output()
            .map_err(|e| {
                evaluation_error(format!(
                    "failed to run {}: {e}",
                    self.program.to_string_lossy()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .map(str::trim)
                .find(|line| line.contains("Error"))
                .unwrap_or_else(|| stderr.trim());
            return Err(evaluation_error(format!(
                "interpreter exited with {}: {reason}",
                output.status
            )));
        }

        let report: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| evaluation_error(format!("invalid interpreter output: {e}")))?;

        match report.get("type").and_then(Value::as_str) {
            Some("object") => Ok(report.get("value").cloned().unwrap_or(Value::Null)),
            Some(other) => Err(ParseError::NotAnObject {
                path: path.to_path_buf(),
                found: other.to_string(),
            }),
            None => Err(evaluation_error(
                "interpreter output is missing the export type".to_string(),
            )),
        }
    }
}

/// Evaluate a module file into a tree.
///
/// Returns an empty tree if evaluation fails or the module does not export an object.
pub fn parse_module_file(path: &Path, ctx: &ParseContext) -> ConfigTree {
    match parse_module_inner(path, ctx) {
        Ok(tree) => tree,
        Err(e) => {
            log_parse_failure(&ctx.log, "parse_module_file", path, &e);
            ConfigTree::new()
        }
    }
}

fn parse_module_inner(path: &Path, ctx: &ParseContext) -> Result<ConfigTree, ParseError> {
    let absolute = absolute_path(path)?;

    match ctx.evaluator.evaluate(&absolute)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject {
            path: absolute,
            found: json_type_name(&other).to_string(),
        }),
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, ParseError> {
    std::path::absolute(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })
}
