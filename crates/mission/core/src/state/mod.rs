//! Mission data model.
//!
//! Plain value types shared by the loaders, the engine and the hosts. Nothing
//! here touches the simulation: entity handles are opaque identifiers handed
//! out by the [`crate::env::EntityWorld`] implementation.
mod common;
mod phase;
mod scenario;

pub use common::{EntityHandle, MarkerHandle, Position};
pub use phase::MissionPhase;
pub use scenario::{Axis, ElementKind, EntitySpawnSpec, ModelId, ScenarioRecord};
