//! Error types surfaced by the runtime API.
use std::path::PathBuf;

use mission_core::{ErrorSeverity, MissionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

/// A log sink could not append a line.
#[derive(Debug, Error)]
pub enum LogSinkError {
    #[error("Error Writing to log file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MissionError for LogSinkError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "LOG_WRITE_ERROR"
    }
}

/// Menu actions the host refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("a mission is already running")]
    AlreadyActive,

    #[error("no mission is running")]
    NotActive,

    #[error("no scenarios available")]
    EmptyCatalog,

    #[error("scenario index {index} out of range ({len} available)")]
    NoSuchScenario { index: usize, len: usize },
}

impl MissionError for HostError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            HostError::AlreadyActive | HostError::NotActive => ErrorSeverity::Recoverable,
            HostError::EmptyCatalog | HostError::NoSuchScenario { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            HostError::AlreadyActive => "HOST_ALREADY_ACTIVE",
            HostError::NotActive => "HOST_NOT_ACTIVE",
            HostError::EmptyCatalog => "HOST_EMPTY_CATALOG",
            HostError::NoSuchScenario { .. } => "HOST_NO_SUCH_SCENARIO",
        }
    }
}
