//! Log lines and the aggregate report of a tuning run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Severity tag of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Progress and configuration skips.
    Info,
    /// A file or pair was skipped as unusable.
    Warning,
    /// An unexpected I/O failure.
    Error,
}

impl LogLevel {
    /// Short uppercase tag.
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Ordered sink for log lines emitted during a run.
#[derive(Debug, Default, Clone)]
pub struct TuneLog {
    entries: Vec<LogEntry>,
}

impl TuneLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line without a file.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            level,
            message: message.into(),
            path: None,
        });
    }

    /// Append a line about a specific file.
    pub fn push_file(&mut self, level: LogLevel, path: &Path, message: impl Into<String>) {
        self.entries.push(LogEntry {
            level,
            message: message.into(),
            path: Some(path.to_path_buf()),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn warn_file(&mut self, path: &Path, message: impl Into<String>) {
        self.push_file(LogLevel::Warning, path, message);
    }

    pub fn error_file(&mut self, path: &Path, message: impl Into<String>) {
        self.push_file(LogLevel::Error, path, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Per-file outcome counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    /// Files rewritten on disk.
    pub written: usize,
    /// Files read but left untouched because nothing changed.
    pub unchanged: usize,
    /// Files skipped with a warning or error.
    pub failed: usize,
}

/// Result of a tuning run handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuneReport {
    /// Seed used for randomized transforms.
    pub seed: u32,
    /// Whether the run finished without error-level entries.
    pub success: bool,
    pub files: FileCounts,
    pub entries: Vec<LogEntry>,
}

impl TuneReport {
    pub fn new(seed: u32, files: FileCounts, log: TuneLog) -> Self {
        let entries = log.into_entries();
        let success = !entries.iter().any(|e| e.level == LogLevel::Error);
        Self {
            seed,
            success,
            files,
            entries,
        }
    }

    /// Number of entries at a given level.
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}
