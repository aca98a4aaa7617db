use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Sink for per-request access log entries.
///
/// Handed to the server through [`AppState`](crate::state::AppState) so no
/// global file handle exists. Implementations must never fail a request.
pub trait RequestLog: Send + Sync {
    /// Record one entry. `client` identifies the caller (peer address or `-`).
    fn record(&self, client: &str, message: &str);
}

/// Forwards entries to the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeRequestLog;

impl RequestLog for LogFacadeRequestLog {
    fn record(&self, client: &str, message: &str) {
        log::info!(target: "request", "[{client}] {message}");
    }
}

/// Appends entries to a plain-text file, one line per request:
/// `HH:MM:SS MM/DD/YYYY[client]:message\r\n`.
///
/// The file is opened in append mode for every entry, so concurrent
/// requests never share a handle.
#[derive(Debug, Clone)]
pub struct FileRequestLog {
    path: PathBuf,
}

impl FileRequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRequestLog { path: path.into() }
    }

    fn format_line(client: &str, message: &str) -> String {
        let now = Local::now().format("%H:%M:%S %m/%d/%Y");
        format!("{now}[{client}]:{message}\r\n")
    }
}

impl RequestLog for FileRequestLog {
    fn record(&self, client: &str, message: &str) {
        let line = Self::format_line(client, message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        if let Err(err) = written {
            log::error!("cannot append to request log {}: {err}", self.path.display());
        }
    }
}
