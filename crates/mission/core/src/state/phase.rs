/// Lifecycle of one mission run.
///
/// ```text
/// Idle → Preparing → AwaitingPickup → Transporting → { Completed | Failed | Cancelled }
/// ```
///
/// Terminal phases are left only through a new `prepare` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MissionPhase {
    #[default]
    Idle,
    Preparing,
    AwaitingPickup,
    Transporting,
    Completed,
    Failed,
    Cancelled,
}

impl MissionPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// True while the host is expected to keep calling `tick`.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::AwaitingPickup | Self::Transporting)
    }
}
