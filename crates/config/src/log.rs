//! Debug-gated logging for the loader.
//!
//! Responsibilities:
//! - Emit loader diagnostics only when the caller enabled debug output.
//! - Route messages to a caller-provided sink, or to `tracing` when none is set.
//!
//! Invariants:
//! - With debug disabled nothing is emitted, not even to `tracing`.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Destination for debug messages emitted by the loader.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Logger carrying the debug toggle and the optional sink.
#[derive(Clone, Default)]
pub struct DebugLog {
    enabled: bool,
    sink: Option<Arc<dyn LogSink>>,
}

impl fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugLog")
            .field("enabled", &self.enabled)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl DebugLog {
    /// Logger that never emits anything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(enabled: bool, sink: Option<Arc<dyn LogSink>>) -> Self {
        Self { enabled, sink }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log `message` under `prefix`, as `<prefix>: <message>`.
    pub fn log(&self, prefix: &str, message: impl fmt::Display) {
        if !self.enabled {
            return;
        }

        match &self.sink {
            Some(sink) => sink.log(&format!("{prefix}: {message}")),
            None => tracing::debug!(target: "enx_config", prefix, "{message}"),
        }
    }

    /// Log an error together with its whole source chain.
    pub fn log_error(&self, prefix: &str, error: &dyn Error) {
        if self.enabled {
            self.log(prefix, error_chain(error));
        }
    }
}

/// Render an error and its sources as `outer: inner: root`.
fn error_chain(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::RecordingSink;

    #[test]
    fn test_disabled_log_emits_nothing() {
        let sink = RecordingSink::shared();
        let log = DebugLog::new(false, Some(sink.clone()));

        log.log("prefix", "message");

        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_enabled_log_formats_prefix() {
        let sink = RecordingSink::shared();
        let log = DebugLog::new(true, Some(sink.clone()));

        log.log("vars", "{\"a\":1}");

        assert_eq!(sink.lines(), vec!["vars: {\"a\":1}".to_string()]);
    }

    #[test]
    fn test_log_error_includes_source_chain() {
        let sink = RecordingSink::shared();
        let log = DebugLog::new(true, Some(sink.clone()));
        let error = crate::ParseError::Read {
            path: "cfg.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        log.log_error("parse", &error);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("parse: Failed to read config file at cfg.json"));
        assert!(lines[0].ends_with("no such file"));
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let captured = seen.clone();
        let sink: Arc<dyn LogSink> = Arc::new(move |line: &str| {
            captured.lock().unwrap().push(line.to_string());
        });
        let log = DebugLog::new(true, Some(sink));

        log.log("enx", "already loaded");

        assert_eq!(*seen.lock().unwrap(), vec!["enx: already loaded".to_string()]);
    }
}
