//! Traits describing the host simulation the mission runs inside.
//!
//! The engine never sees the simulation's entity representation. It talks
//! to small capability traits instead, which [`Simulation`] bundles so a host
//! only hands one value to each engine call. Scenario data arrives through
//! [`ScenarioSource`] and diagnostics leave through [`MissionLog`].
mod display;
mod log;
mod player;
mod rng;
mod scenario;
mod world;

pub use display::{BlipDisplay, BlipSprite, MarkerColor, Screen};
pub use log::MissionLog;
pub use player::{Control, PlayerState};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use scenario::{ResolvedScenario, ScenarioSource};
pub use world::{EntityWorld, HostClock, VehicleSeat};

/// Everything the engine needs from the host for one call.
///
/// Implemented automatically for any type providing all capabilities.
pub trait Simulation: EntityWorld + BlipDisplay + PlayerState + Screen + HostClock {}

impl<T> Simulation for T where T: EntityWorld + BlipDisplay + PlayerState + Screen + HostClock {}
