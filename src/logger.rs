//! Run-scoped logging.
//!
//! Every run of the organizer constructs its own [`RunLogger`] and hands it to the
//! orchestrator, so there is no global logging state to set up or tear down.
//! Each line is written twice: plain to the log file, and with a colored level
//! marker to standard output. Both share the format
//! `<timestamp> - <LEVEL> - <message>`.

use colored::Colorize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn colored(self) -> colored::ColoredString {
        match self {
            LogLevel::Info => self.as_str().cyan(),
            LogLevel::Warning => self.as_str().yellow(),
            LogLevel::Error => self.as_str().red(),
        }
    }
}

/// A logger owned by a single organization run.
///
/// Opened against a log file before the run starts; dropping it at the end of the
/// run closes the file. Console output goes to stdout so it survives capture by
/// schedulers and shell redirection.
pub struct RunLogger {
    file: Option<File>,
}

impl RunLogger {
    /// Opens a logger appending to the given log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Some(file) })
    }

    /// A logger that only echoes to the console, with no backing file.
    pub fn console_only() -> Self {
        Self { file: None }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    fn log(&self, level: LogLevel, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        println!("{} - {} - {}", timestamp, level.colored(), message);

        if let Some(file) = &self.file {
            let mut handle = file;
            // A log line that cannot be appended is dropped rather than failing the run.
            let _ = writeln!(handle, "{} - {} - {}", timestamp, level.as_str(), message);
        }
    }
}
