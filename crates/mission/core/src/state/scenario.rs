//! Scenario records as resolved from the data source.
//!
//! Malformed or absent fields never surface as errors here. The loaders
//! substitute the sentinels defined on [`ScenarioRecord`] so a bad record
//! degrades visibly in game instead of aborting the host.

use std::fmt;

use super::Position;

/// Model identifier used to instantiate an entity.
///
/// Passengers are always addressed by numeric hash; vehicles may also use the
/// symbolic model name (`"bus"`, `"coach"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelId {
    Hash(i32),
    Name(String),
}

impl ModelId {
    /// Numeric hashes parse first; any other non-blank text is a model name.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(match text.parse::<i32>() {
            Ok(hash) => Self::Hash(hash),
            Err(_) => Self::Name(text.to_string()),
        })
    }

    pub fn as_hash(&self) -> Option<i32> {
        match self {
            Self::Hash(hash) => Some(*hash),
            Self::Name(_) => None,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(hash) => write!(f, "{hash}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Model, placement and facing for one entity to spawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpawnSpec {
    pub model: ModelId,
    pub position: Position,
    pub heading: f32,
}

impl EntitySpawnSpec {
    pub fn new(model: ModelId, position: Position, heading: f32) -> Self {
        Self {
            model,
            position,
            heading,
        }
    }
}

/// The three kinds of positioned sub-records inside a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    #[strum(serialize = "ped")]
    Passenger,
    #[strum(serialize = "vehicle")]
    Vehicle,
    #[strum(serialize = "destination")]
    Destination,
}

impl ElementKind {
    /// Element tag used in the scenario document.
    pub fn tag(self) -> &'static str {
        self.into()
    }
}

/// Coordinate selector for positioned sub-records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[strum(serialize = "x")]
    X,
    #[strum(serialize = "y")]
    Y,
    #[strum(serialize = "z")]
    Z,
    #[strum(serialize = "t")]
    Heading,
}

impl Axis {
    /// Tags accepted for this axis, preferred spelling first.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Axis::X => &["x"],
            Axis::Y => &["y"],
            Axis::Z => &["z"],
            Axis::Heading => &["t", "heading"],
        }
    }
}

/// One playable transport task, immutable once resolved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioRecord {
    pub name: String,
    /// Subtitle lines, shown in order.
    pub description: Vec<String>,
    pub passengers: Vec<EntitySpawnSpec>,
    pub vehicle: EntitySpawnSpec,
    pub destination: Position,
    /// Reward on delivery, and penalty on failure or cancellation.
    pub reward: i32,
}

impl ScenarioRecord {
    /// Sentinel for counts and model hashes that could not be read.
    pub const MISSING_NUMBER: i32 = -1;
    /// Sentinel for coordinates that could not be read.
    pub const MISSING_COORDINATE: f32 = 100_000.0;
    /// Sentinel for a reward that could not be read.
    pub const MISSING_REWARD: i32 = -1;
    /// Model used when the vehicle record carries no model at all.
    pub const DEFAULT_VEHICLE_MODEL: &'static str = "bus";
    /// Separator between subtitle lines in the authored description.
    pub const DESCRIPTION_DELIMITER: char = '|';

    /// Splits an authored description into trimmed, non-empty subtitle lines.
    pub fn split_description(text: &str) -> Vec<String> {
        text.split(Self::DESCRIPTION_DELIMITER)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_reward(&self) -> bool {
        self.reward != Self::MISSING_REWARD
    }
}
