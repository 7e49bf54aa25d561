//! Progress reporting for pipeline runs.
//!
//! The pipeline never prints directly; it talks to an injected
//! [`Reporter`]. The console implementation lives here, and tests run
//! the pipeline against [`SilentReporter`] instead of capturing
//! output.

use serde::{Deserialize, Serialize};

/// Severity of a progress message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single progress message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for pipeline progress messages.
pub trait Reporter {
    fn log(&self, entry: LogEntry);

    fn info(&self, message: &str) {
        self.log(LogEntry::info(message));
    }

    fn success(&self, message: &str) {
        self.log(LogEntry::success(message));
    }

    fn warning(&self, message: &str) {
        self.log(LogEntry::warning(message));
    }

    fn error(&self, message: &str) {
        self.log(LogEntry::error(message));
    }
}

/// Prints progress to stdout with a level prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "  ",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Error => "❌ ",
        };
        println!("{}{}", prefix, entry.message);
    }
}

/// Discards all messages. Used by tests that exercise the pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn log(&self, _entry: LogEntry) {}
}
