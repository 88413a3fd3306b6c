//! Common error infrastructure for mission-core.
//!
//! None of these errors ever escape the engine's public operations. They are
//! classified here so the engine can turn them into on-screen diagnostics and
//! log lines with a stable code, and so hosts can inspect partial setups.

use strum::IntoStaticStr;

use crate::state::ElementKind;

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// A later attempt may succeed (e.g. the simulation refused a spawn).
    Recoverable,
    /// The authored data is wrong and must be fixed by hand.
    Validation,
    /// Unexpected state inconsistency.
    Internal,
    /// The component cannot operate at all (e.g. data source unreadable).
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all mission errors.
pub trait MissionError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier shown in diagnostics.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures resolving a scenario by name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// The data source could not be read or parsed at all.
    #[error("Failed to load missions.xml: {reason}")]
    Load { reason: String },

    #[error("scenario '{name}' not found")]
    NotFound { name: String },

    #[error("scenario '{name}' is defined {count} times")]
    Duplicate { name: String, count: usize },
}

impl MissionError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScenarioError::Load { .. } => ErrorSeverity::Fatal,
            ScenarioError::NotFound { .. } | ScenarioError::Duplicate { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScenarioError::Load { .. } => "SCENARIO_LOAD_ERROR",
            ScenarioError::NotFound { .. } => "SCENARIO_NOT_FOUND",
            ScenarioError::Duplicate { .. } => "SCENARIO_DUPLICATE",
        }
    }
}

/// The simulation refused to create an entity or marker.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error("model {model} could not be loaded for {kind}")]
    ModelUnavailable { kind: ElementKind, model: String },

    #[error("{kind} cannot be placed at {position}")]
    InvalidPlacement {
        kind: ElementKind,
        position: crate::state::Position,
    },

    #[error("simulation refused to create {kind}: {reason}")]
    Rejected { kind: ElementKind, reason: String },
}

impl SpawnError {
    pub fn kind(&self) -> ElementKind {
        match self {
            SpawnError::ModelUnavailable { kind, .. }
            | SpawnError::InvalidPlacement { kind, .. }
            | SpawnError::Rejected { kind, .. } => *kind,
        }
    }
}

impl MissionError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpawnError::ModelUnavailable { .. } | SpawnError::InvalidPlacement { .. } => {
                ErrorSeverity::Validation
            }
            SpawnError::Rejected { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        SetupStep::for_kind(self.kind()).error_code()
    }
}

/// Setup steps of `prepare` that may fail independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupStep {
    #[strum(serialize = "GENERATE_PED_ERROR")]
    Passengers,
    #[strum(serialize = "VEHICLE_ERROR")]
    Vehicle,
    #[strum(serialize = "ADD_DESTINATION_ERROR")]
    Destination,
}

impl SetupStep {
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Passenger => SetupStep::Passengers,
            ElementKind::Vehicle => SetupStep::Vehicle,
            ElementKind::Destination => SetupStep::Destination,
        }
    }

    /// Tag shown on screen when this step fails.
    pub fn error_code(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;

    #[test]
    fn spawn_errors_carry_step_tags() {
        let ped = SpawnError::ModelUnavailable {
            kind: ElementKind::Passenger,
            model: "-1".into(),
        };
        let vehicle = SpawnError::Rejected {
            kind: ElementKind::Vehicle,
            reason: "pool full".into(),
        };
        let marker = SpawnError::InvalidPlacement {
            kind: ElementKind::Destination,
            position: Position::ORIGIN,
        };
        assert_eq!(ped.error_code(), "GENERATE_PED_ERROR");
        assert_eq!(vehicle.error_code(), "VEHICLE_ERROR");
        assert_eq!(marker.error_code(), "ADD_DESTINATION_ERROR");
        assert!(vehicle.severity().is_recoverable());
    }

    #[test]
    fn load_failure_is_fatal() {
        let err = ScenarioError::Load {
            reason: "missing".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.to_string(), "Failed to load missions.xml: missing");
    }
}
