//! Structured logger with per-policy summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{PolicyEntry, PolicyStatus};
use super::utils::log_file_path;

/// Structured logger with summary collection.
///
/// Messages are emitted as [`tracing`] events; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them on
/// the console and appends them to
/// `$XDG_CACHE_HOME/ansible-master/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    policies: Mutex<Vec<PolicyEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the summary. The file itself
    /// is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            policies: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return a clone of all recorded policy entries.
    #[must_use]
    pub fn entries(&self) -> Vec<PolicyEntry> {
        self.policies.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "ansible_master::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a policy result for the summary.
    pub fn record_policy(&self, name: &str, status: PolicyStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.policies.lock() {
            guard.push(PolicyEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed policies.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.policies.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|p| p.status == PolicyStatus::Failed)
                .count()
        })
    }

    /// Log the summary of all recorded policies.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut not_applicable = 0u32;
        let mut failed = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                PolicyStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                PolicyStatus::NotApplicable => {
                    not_applicable += 1;
                    ("·", "\x1b[2m")
                }
                PolicyStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + not_applicable + failed;
        self.info(&format!(
            "{total} policies: \x1b[32m{ok} ok\x1b[0m, \x1b[2m{not_applicable} n/a\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}
