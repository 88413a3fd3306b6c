use std::time::Duration;

use crate::error::SpawnError;
use crate::state::{EntityHandle, EntitySpawnSpec, Position};

/// Seat selector when commanding a character into a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VehicleSeat {
    #[default]
    Any,
    Driver,
    Passenger(u8),
}

/// Live entity registry of the host simulation.
///
/// Queries on a handle the simulation no longer knows must answer
/// conservatively (not alive, not stopped, not inside) instead of failing.
pub trait EntityWorld {
    fn spawn_ped(&mut self, spec: &EntitySpawnSpec) -> Result<EntityHandle, SpawnError>;
    fn spawn_vehicle(&mut self, spec: &EntitySpawnSpec) -> Result<EntityHandle, SpawnError>;

    fn position(&self, entity: EntityHandle) -> Position;
    fn set_position(&mut self, entity: EntityHandle, position: Position);

    fn is_alive(&self, entity: EntityHandle) -> bool;
    fn is_stopped(&self, entity: EntityHandle) -> bool;
    fn set_invincible(&mut self, entity: EntityHandle, invincible: bool);

    fn is_in_vehicle(&self, ped: EntityHandle, vehicle: EntityHandle) -> bool;
    fn set_into_vehicle(&mut self, ped: EntityHandle, vehicle: EntityHandle, seat: VehicleSeat);

    /// Hands the entity back to the simulation for normal despawning.
    fn mark_no_longer_needed(&mut self, entity: EntityHandle);
}

/// Cooperative suspension of the calling script.
pub trait HostClock {
    /// Blocks the caller for `duration`; the simulation keeps running.
    fn wait(&mut self, duration: Duration);
}
