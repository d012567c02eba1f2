//! Centralized constants for the enx workspace.
//!
//! File naming conventions, separators, and the environment variables the
//! loader itself reads.

// =============================================================================
// File Naming
// =============================================================================

/// Placeholder substituted with the environment name in file name templates.
pub const ENV_PLACEHOLDER: &str = "${env}";

/// Default file name template. Resolves to `.env.json` (base layer) and
/// `.env.<env>.json` (override layer).
pub const DEFAULT_FILE_NAME: &str = ".env.${env}.json";

/// Leading marker identifying the key=value line format.
pub const DOTENV_MARKER: &str = ".env";

/// Structured-data (JSON) file extension.
pub const JSON_EXTENSION: &str = ".json";

/// Extension used for the executable-module candidate of a JSON path.
pub const MODULE_EXTENSION: &str = ".js";

/// All extensions recognized as executable modules.
pub const MODULE_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs"];

// =============================================================================
// Flattening
// =============================================================================

/// Separator used when flattening into environment-variable names.
pub const ENV_SEPARATOR: &str = "_";

/// Separator used for dotted paths (`a.b.c`).
pub const PATH_SEPARATOR: &str = ".";

// =============================================================================
// Environment Variables
// =============================================================================

/// Primary variable naming the deployment environment.
pub const ENV_NAME_VAR: &str = "ENX_ENV";

/// Fallback variable naming the deployment environment.
pub const FALLBACK_ENV_NAME_VAR: &str = "NODE_ENV";

/// Variable overriding the interpreter used to evaluate module files.
pub const NODE_BIN_VAR: &str = "ENX_NODE_BIN";

/// Interpreter used to evaluate module files when `ENX_NODE_BIN` is unset.
pub const DEFAULT_NODE_BIN: &str = "node";
