//! Mission lifecycle logic and data types for scripted passenger transport.
//!
//! `mission-core` defines the scenario data model, the collaborator traits a
//! host simulation must implement, and the [`engine::MissionEngine`] state
//! machine that decides, every tick, what the mission does next. It performs
//! no I/O of its own: scenario records arrive through [`env::ScenarioSource`]
//! and every effect on the world goes through [`env::Simulation`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod passengers;
pub mod state;

pub use config::{MissionConfig, ModConfig};
pub use engine::{MissionEngine, PrepareOutcome, TickOutcome};
pub use env::{
    BlipDisplay, BlipSprite, Control, EntityWorld, HostClock, MarkerColor, MissionLog, PcgRng,
    PlayerState, ResolvedScenario, RngOracle, ScenarioSource, Screen, Simulation, VehicleSeat,
    compute_seed,
};
pub use error::{ErrorSeverity, MissionError, ScenarioError, SetupStep, SpawnError};
pub use passengers::PassengerGroup;
pub use state::{
    Axis, ElementKind, EntityHandle, EntitySpawnSpec, MarkerHandle, MissionPhase, ModelId,
    Position, ScenarioRecord,
};
