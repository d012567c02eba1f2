//! Layered environment configuration for enx.
//!
//! This crate loads a base configuration file, merges an environment-specific
//! override file on top of it, and optionally flattens the result into process
//! environment variables (and re-absorbs live variables back into the tree).

pub mod constants;
mod env;
mod error;
mod flatten;
mod loader;
mod log;
mod merge;
pub mod parsers;
mod resolver;
mod tree;

pub use env::{EnvProvider, MemoryEnv, ProcessEnv, env_var_or_none};
pub use error::{ConfigError, ParseError};
pub use flatten::{flatten, flatten_leaves, tree_from_env, unflatten};
pub use loader::{ConfigCache, LoadOptions, load};
pub use log::{DebugLog, LogSink};
pub use merge::{merge, merge_into};
pub use parsers::{
    FileFormat, ModuleEvaluator, NodeEvaluator, ParseContext, parse_config_file,
};
pub use resolver::{candidate_paths, resolve_and_parse};
pub use tree::{ConfigTree, FlatMap, lookup_path, stringify_scalar};
