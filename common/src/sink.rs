//! Optional sinks that record diagnostic outcomes as lines of text.
//!
//! A sink failing must never change the outcome of a diagnostic, so callers go
//! through [`record_outcome`], which logs and discards write errors.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        f.write_str(label)
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, level: Severity, message: &str) -> anyhow::Result<()>;
}

/// Writes to `sink`, swallowing any failure after logging it.
pub fn record_outcome(sink: &dyn DiagnosticSink, level: Severity, message: &str) {
    if let Err(e) = sink.record(level, message) {
        crate::debug!("diagnostic sink rejected a record: {e:#}");
    }
}

/// Forwards records to the `tracing` subscriber at debug level, so they only
/// show up next to regular output when verbose logging is on.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, level: Severity, message: &str) -> anyhow::Result<()> {
        tracing::debug!(target: "netdiag::outcome", "[{level}] {message}");
        Ok(())
    }
}

/// Appends `YYYY-MM-DD HH:MM:SS [Level] message` lines to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for FileSink {
    fn record(&self, level: Severity, message: &str) -> anyhow::Result<()> {
        let line: String = format_line(&chrono::Local::now(), level, message);
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("log file lock poisoned"))?;
        writeln!(file, "{line}").with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

fn format_line<Tz>(at: &chrono::DateTime<Tz>, level: Severity, message: &str) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{} [{level}] {message}", at.format("%Y-%m-%d %H:%M:%S"))
}
