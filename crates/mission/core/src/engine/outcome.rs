use crate::error::{ScenarioError, SetupStep};

/// Result of [`super::MissionEngine::prepare`].
#[derive(Clone, Debug, PartialEq)]
pub enum PrepareOutcome {
    /// The scenario could not be resolved; nothing was spawned.
    Unresolved(ScenarioError),
    /// Every setup step succeeded.
    Ready,
    /// The mission is running, but the listed steps failed.
    Partial(Vec<SetupStep>),
}

impl PrepareOutcome {
    /// True when the engine is now awaiting pickup.
    pub fn is_running(&self) -> bool {
        !matches!(self, PrepareOutcome::Unresolved(_))
    }

    pub fn failed_steps(&self) -> &[SetupStep] {
        match self {
            PrepareOutcome::Partial(steps) => steps,
            _ => &[],
        }
    }
}

/// Result of one [`super::MissionEngine::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum TickOutcome {
    /// No mission is running; nothing was evaluated.
    Idle,
    Running,
    /// Delivered on this tick; cleanup already ran.
    Completed,
    /// Failed on this tick; cleanup and penalty already ran.
    Failed,
}

impl TickOutcome {
    /// True when the host should keep ticking.
    pub fn is_active(self) -> bool {
        matches!(self, TickOutcome::Running)
    }
}
