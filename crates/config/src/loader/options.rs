//! Builder for load options.
//!
//! Every option is independently defaultable; unset options are resolved
//! against the environment provider when `load` runs.

use std::path::PathBuf;
use std::sync::Arc;

use super::cache::ConfigCache;
use crate::constants::DEFAULT_FILE_NAME;
use crate::env::{EnvProvider, ProcessEnv};
use crate::log::{DebugLog, LogSink};
use crate::parsers::ModuleEvaluator;

/// Options controlling a configuration load.
#[derive(Clone)]
pub struct LoadOptions {
    pub(crate) cache: Option<Arc<ConfigCache>>,
    pub(crate) file_name: String,
    pub(crate) env_name: Option<String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) inject_to_process: bool,
    pub(crate) merge_process_env: bool,
    pub(crate) process_env_prefix: Option<String>,
    pub(crate) debug: bool,
    pub(crate) log_sink: Option<Arc<dyn LogSink>>,
    pub(crate) env_provider: Arc<dyn EnvProvider>,
    pub(crate) module_evaluator: Option<Arc<dyn ModuleEvaluator>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOptions {
    /// Options with every default: global cache, `.env.${env}.json`, the
    /// process environment, injection on, re-absorption off, debug off.
    pub fn new() -> Self {
        Self {
            cache: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            env_name: None,
            cwd: None,
            inject_to_process: true,
            merge_process_env: false,
            process_env_prefix: None,
            debug: false,
            log_sink: None,
            env_provider: Arc::new(ProcessEnv),
            module_evaluator: None,
        }
    }

    /// Store the result in `cache` instead of the global cache.
    pub fn with_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the file name template. It should contain `${env}`.
    ///
    /// Any template other than the default is parsed with the single-format
    /// parser, without trying `.env`/`.js` variants.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the environment name selecting the override file.
    pub fn with_env_name(mut self, env_name: impl Into<String>) -> Self {
        self.env_name = Some(env_name.into());
        self
    }

    /// Resolve relative file names against `cwd`.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Whether to write the flattened result into the environment.
    pub fn with_inject_to_process(mut self, inject: bool) -> Self {
        self.inject_to_process = inject;
        self
    }

    /// Whether live environment variables override file values.
    pub fn with_merge_process_env(mut self, merge: bool) -> Self {
        self.merge_process_env = merge;
        self
    }

    /// Only re-absorb variables starting with `prefix` (stripped).
    pub fn with_process_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.process_env_prefix = Some(prefix.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Send debug output to `sink` instead of `tracing`.
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Read and write environment variables through `provider`.
    pub fn with_env_provider(mut self, provider: Arc<dyn EnvProvider>) -> Self {
        self.env_provider = provider;
        self
    }

    /// Evaluate module files with `evaluator`.
    pub fn with_module_evaluator(mut self, evaluator: Arc<dyn ModuleEvaluator>) -> Self {
        self.module_evaluator = Some(evaluator);
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_default_file_name(&self) -> bool {
        self.file_name == DEFAULT_FILE_NAME
    }

    pub(crate) fn debug_log(&self) -> DebugLog {
        DebugLog::new(self.debug, self.log_sink.clone())
    }

    pub(crate) fn cache(&self) -> Arc<ConfigCache> {
        self.cache.clone().unwrap_or_else(ConfigCache::global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::new();

        assert!(options.is_default_file_name());
        assert_eq!(options.file_name(), ".env.${env}.json");
        assert!(options.inject_to_process);
        assert!(!options.merge_process_env);
        assert!(!options.debug);
        assert!(options.env_name.is_none());
        assert!(options.cwd.is_none());
        assert!(Arc::ptr_eq(&options.cache(), &ConfigCache::global()));
    }

    #[test]
    fn test_builder_overrides() {
        let cache = Arc::new(ConfigCache::new());
        let options = LoadOptions::new()
            .with_cache(cache.clone())
            .with_file_name("config.${env}.json")
            .with_env_name("staging")
            .with_cwd("/srv/app")
            .with_inject_to_process(false)
            .with_merge_process_env(true)
            .with_process_env_prefix("APP_")
            .with_debug(true);

        assert!(!options.is_default_file_name());
        assert_eq!(options.env_name.as_deref(), Some("staging"));
        assert_eq!(options.cwd, Some(PathBuf::from("/srv/app")));
        assert!(!options.inject_to_process);
        assert!(options.merge_process_env);
        assert_eq!(options.process_env_prefix.as_deref(), Some("APP_"));
        assert!(options.debug_log().is_enabled());
        assert!(Arc::ptr_eq(&options.cache(), &cache));
    }
}
