//! Host-side orchestration for the mission engine.
//!
//! This crate wires the engine from `mission-core` to the content loaders and
//! to whatever simulation drives it. Consumers embed [`MissionHost`] to react
//! to key presses and frames, and use [`SandboxWorld`] to run missions
//! headless.
//!
//! Modules are organized by responsibility:
//! - [`host`] owns the engine, the scenario catalog and the menu state
//! - [`logging`] provides the diagnostic sinks injected into the engine
//! - [`sandbox`] is an in-memory simulation for tests and scripted runs
pub mod error;
pub mod host;
pub mod logging;
pub mod sandbox;

pub use error::{HostError, LogSinkError, Result};
pub use host::MissionHost;
pub use logging::{FileLogger, NoopLogger};
pub use sandbox::{EntityKind, SandboxEntity, SandboxMarker, SandboxWorld, Subtitle};
