//! In-app diagnostic buffer, shown by the shell's `logs` command (instead
//! of println/eprintln noise over the card text).

use std::sync::{LazyLock, Mutex};

const MAX_LOGS: usize = 500;

static LOG_BUF: LazyLock<Mutex<Vec<LogEntry>>> = LazyLock::new(|| Mutex::new(Vec::new()));

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

/// Append a diagnostic line. Safe to call from any task (e.g. from the
/// spawned GitHub append).
pub fn app_log(level: &str, message: impl Into<String>) {
    let entry = LogEntry {
        time: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
        level: level.to_string(),
        message: message.into(),
    };
    if let Ok(mut buf) = LOG_BUF.lock() {
        buf.push(entry);
        let n = buf.len();
        if n > MAX_LOGS {
            buf.drain(0..n - MAX_LOGS);
        }
    }
}

/// Snapshot of the current diagnostics, oldest first.
pub fn app_logs_snapshot() -> Vec<LogEntry> {
    LOG_BUF.lock().map(|buf| buf.clone()).unwrap_or_default()
}
