//! Diagnostic sinks for [`MissionLog`].

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use mission_core::{MissionError, MissionLog};

use crate::error::LogSinkError;

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl MissionLog for NoopLogger {
    fn log(&self, _message: &str) {}
}

type FailureChannel = Box<dyn Fn(&LogSinkError) + Send + Sync>;

/// Appends timestamped lines to a text file.
///
/// Each line reads `[LOG] -- <local time>: <message>`. The file is opened per
/// message so an external tail or rotation never holds a stale handle.
/// Append failures go to the failure channel and are otherwise dropped.
pub struct FileLogger {
    path: PathBuf,
    on_failure: FailureChannel,
}

impl FileLogger {
    pub const DEFAULT_FILE_NAME: &'static str = "BusModGtaV.log";
    const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            on_failure: Box::new(|err: &LogSinkError| {
                tracing::error!("[{}] {}: {}", err.error_code(), err, source_of(err));
            }),
        }
    }

    /// Replaces the default `tracing::error!` failure channel.
    pub fn with_failure_channel(
        mut self,
        on_failure: impl Fn(&LogSinkError) + Send + Sync + 'static,
    ) -> Self {
        self.on_failure = Box::new(on_failure);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line, reporting the failure instead of swallowing it.
    pub fn try_append(&self, message: &str) -> Result<(), LogSinkError> {
        let timestamp = chrono::Local::now().format(Self::TIMESTAMP_FORMAT);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "[LOG] -- {timestamp}: {message}"))
            .map_err(|source| LogSinkError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

impl MissionLog for FileLogger {
    fn log(&self, message: &str) {
        if let Err(err) = self.try_append(message) {
            (self.on_failure)(&err);
        }
    }
}

fn source_of(err: &LogSinkError) -> &std::io::Error {
    match err {
        LogSinkError::Write { source, .. } => source,
    }
}
