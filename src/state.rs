use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::request_log::{FileRequestLog, LogFacadeRequestLog, RequestLog};

// ---------------------------------------------------------------------------
// Server state
// ---------------------------------------------------------------------------

/// Read-only state shared by all handlers.
///
/// Holds no dataset: every request loads the source afresh, so concurrent
/// requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Delimited price list file.
    pub source: PathBuf,

    /// Where request log entries go.
    pub request_log: Arc<dyn RequestLog>,
}

impl AppState {
    pub fn new(source: impl Into<PathBuf>, request_log: Arc<dyn RequestLog>) -> Self {
        Self {
            source: source.into(),
            request_log,
        }
    }

    /// State for `config`; requests are logged to a file only if one is configured.
    pub fn from_config(config: &ServerConfig) -> Self {
        let request_log: Arc<dyn RequestLog> = match &config.request_log {
            Some(path) => Arc::new(FileRequestLog::new(path)),
            None => Arc::new(LogFacadeRequestLog),
        };
        Self::new(&config.source, request_log)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
