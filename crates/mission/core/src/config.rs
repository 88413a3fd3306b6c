use std::path::PathBuf;
use std::time::Duration;

/// Mission tunables: trigger distances, scatter radii and message timings.
///
/// The associated constants are the reference values every host sees by
/// default; the fields let a host or test override them per engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MissionConfig {
    /// Maximum vehicle distance to the first passenger for a pickup.
    pub pickup_distance: f32,
    /// Maximum vehicle distance to the destination for a delivery.
    pub destination_distance: f32,
    /// Pickups closer than this to the destination are ignored.
    pub min_distance_from_destination: f32,
    pub delivery_scatter_radius: f32,
    pub cleanup_scatter_radius: f32,
    pub description_line_ms: u64,
    pub completion_message_ms: u64,
    pub failure_message_ms: u64,
    pub cancellation_message_ms: u64,
}

impl MissionConfig {
    pub const PICKUP_DISTANCE: f32 = 30.0;
    pub const DESTINATION_DISTANCE: f32 = 30.0;
    pub const MIN_DISTANCE_FROM_DESTINATION: f32 = 50.0;
    pub const DELIVERY_SCATTER_RADIUS: f32 = 5.0;
    pub const CLEANUP_SCATTER_RADIUS: f32 = 3.0;
    pub const DESCRIPTION_LINE_MS: u64 = 4000;
    pub const COMPLETION_MESSAGE_MS: u64 = 4000;
    pub const FAILURE_MESSAGE_MS: u64 = 3500;
    pub const CANCELLATION_MESSAGE_MS: u64 = 8000;

    pub fn new() -> Self {
        Self {
            pickup_distance: Self::PICKUP_DISTANCE,
            destination_distance: Self::DESTINATION_DISTANCE,
            min_distance_from_destination: Self::MIN_DISTANCE_FROM_DESTINATION,
            delivery_scatter_radius: Self::DELIVERY_SCATTER_RADIUS,
            cleanup_scatter_radius: Self::CLEANUP_SCATTER_RADIUS,
            description_line_ms: Self::DESCRIPTION_LINE_MS,
            completion_message_ms: Self::COMPLETION_MESSAGE_MS,
            failure_message_ms: Self::FAILURE_MESSAGE_MS,
            cancellation_message_ms: Self::CANCELLATION_MESSAGE_MS,
        }
    }

    pub fn description_line(&self) -> Duration {
        Duration::from_millis(self.description_line_ms)
    }

    pub fn completion_message(&self) -> Duration {
        Duration::from_millis(self.completion_message_ms)
    }

    pub fn failure_message(&self) -> Duration {
        Duration::from_millis(self.failure_message_ms)
    }

    pub fn cancellation_message(&self) -> Duration {
        Duration::from_millis(self.cancellation_message_ms)
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-level settings read from the mod configuration file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModConfig {
    /// Key name that opens the mission menu.
    pub menu_key: String,
    /// Scenario document, relative to the data directory.
    pub missions_file: PathBuf,
    /// Diagnostic log file; logging is discarded when unset.
    pub log_file: Option<PathBuf>,
    /// Base seed for passenger scattering.
    pub seed: u64,
    pub mission: MissionConfig,
}

impl ModConfig {
    pub const DEFAULT_MENU_KEY: &'static str = "F10";
    pub const DEFAULT_MISSIONS_FILE: &'static str = "bus_mod_missions.xml";
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            menu_key: Self::DEFAULT_MENU_KEY.to_string(),
            missions_file: PathBuf::from(Self::DEFAULT_MISSIONS_FILE),
            log_file: None,
            seed: 0,
            mission: MissionConfig::default(),
        }
    }
}
