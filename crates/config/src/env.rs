//! Process environment access.
//!
//! Responsibilities:
//! - Abstract reads and writes of environment variables behind `EnvProvider`.
//! - Provide the real process environment (`ProcessEnv`) and an in-memory
//!   substitute (`MemoryEnv`) for tests and embedding.
//! - Provide a helper reading env vars with empty/whitespace filtering.
//!
//! Invariants:
//! - The loader never touches `std::env` directly; it goes through a provider.
//! - Empty or whitespace-only variables are treated as unset by `env_var_or_none`.

use std::collections::BTreeMap;
use std::sync::RwLock;

/// Source and destination for environment variables.
pub trait EnvProvider: Send + Sync {
    /// Read a single variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Snapshot every variable with a UTF-8 name and value.
    fn vars(&self) -> Vec<(String, String)>;

    /// Write a single variable.
    fn set_var(&self, key: &str, value: &str);
}

/// The live process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn set_var(&self, key: &str, value: &str) {
        // Names the platform rejects would make `set_var` panic.
        if key.is_empty() || key.contains('=') || key.contains('\0') || value.contains('\0') {
            tracing::warn!(key, "Skipping environment variable with an invalid name or value");
            return;
        }

        // SAFETY: loading runs once at process start, before worker threads exist,
        // and the loader serializes its own writes behind the cache lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// In-memory environment, isolated from the process.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<BTreeMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment pre-populated with `vars`.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl EnvProvider for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.snapshot().into_iter().collect()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(provider: &dyn EnvProvider, key: &str) -> Option<String> {
    provider.var(key).and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}
