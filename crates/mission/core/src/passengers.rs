//! Passenger set owned by one mission run.
//!
//! Every bulk operation walks the owned handles in spawn order. The group
//! never outlives its run: [`PassengerGroup::release`] hands all entities back
//! to the simulation and leaves the group empty.

use crate::env::{BlipDisplay, BlipSprite, EntityWorld, PlayerState, RngOracle, VehicleSeat};
use crate::error::SpawnError;
use crate::state::{EntityHandle, EntitySpawnSpec, Position};

/// Handles of the passengers spawned for a run, in spawn order.
///
/// The group owns its handles until [`PassengerGroup::release`].
#[derive(Debug, Default)]
pub struct PassengerGroup {
    passengers: Vec<EntityHandle>,
}

impl PassengerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// The passenger used for pickup distance and route display.
    pub fn first(&self) -> Option<EntityHandle> {
        self.passengers.first().copied()
    }

    pub fn handles(&self) -> &[EntityHandle] {
        &self.passengers
    }

    /// Forgets any previous passengers, then spawns one per spec.
    ///
    /// Stops at the first refused spawn; passengers created before it stay
    /// in the group.
    pub fn spawn<W>(&mut self, world: &mut W, specs: &[EntitySpawnSpec]) -> Result<(), SpawnError>
    where
        W: EntityWorld + ?Sized,
    {
        self.passengers.clear();
        for spec in specs {
            let handle = world.spawn_ped(spec)?;
            tracing::debug!("spawned passenger {} ({}) at {}", handle, spec.model, spec.position);
            self.passengers.push(handle);
        }
        Ok(())
    }

    pub fn set_invincible<W>(&self, world: &mut W, invincible: bool)
    where
        W: EntityWorld + ?Sized,
    {
        for &ped in &self.passengers {
            world.set_invincible(ped, invincible);
        }
    }

    pub fn add_blips<D>(&self, display: &mut D)
    where
        D: BlipDisplay + ?Sized,
    {
        for &ped in &self.passengers {
            display.add_blip(ped);
        }
    }

    pub fn set_blip_sprite<D>(&self, display: &mut D, sprite: BlipSprite)
    where
        D: BlipDisplay + ?Sized,
    {
        for &ped in &self.passengers {
            display.set_blip_sprite(ped, sprite);
        }
    }

    pub fn remove_blip_labels<D>(&self, display: &mut D)
    where
        D: BlipDisplay + ?Sized,
    {
        for &ped in &self.passengers {
            display.remove_blip_label(ped);
        }
    }

    /// Commands every passenger into any free seat of `vehicle`.
    pub fn enter_vehicle<W>(&self, world: &mut W, vehicle: EntityHandle)
    where
        W: EntityWorld + ?Sized,
    {
        for &ped in &self.passengers {
            world.set_into_vehicle(ped, vehicle, VehicleSeat::Any);
        }
    }

    /// False for an empty group.
    pub fn any_dead<W>(&self, world: &W) -> bool
    where
        W: EntityWorld + ?Sized,
    {
        self.passengers.iter().any(|&ped| !world.is_alive(ped))
    }

    /// False for an empty group.
    pub fn any_outside_vehicle<W>(&self, world: &W, vehicle: EntityHandle) -> bool
    where
        W: EntityWorld + ?Sized,
    {
        self.passengers
            .iter()
            .any(|&ped| !world.is_in_vehicle(ped, vehicle))
    }

    /// Teleports each passenger to its own random point within `radius` of `center`.
    ///
    /// `seed_for` maps a passenger to the seed of its draw.
    pub fn scatter_around<W, R>(
        &self,
        world: &mut W,
        rng: &R,
        center: Position,
        radius: f32,
        mut seed_for: impl FnMut(EntityHandle) -> u64,
    ) where
        W: EntityWorld + ?Sized,
        R: RngOracle + ?Sized,
    {
        for &ped in &self.passengers {
            let point = rng.point_around(seed_for(ped), center, radius);
            world.set_position(ped, point);
        }
    }

    /// Puts every passenger in the player's group so they do not flee.
    pub fn set_player_relationship<P>(&self, player: &mut P)
    where
        P: PlayerState + ?Sized,
    {
        for &ped in &self.passengers {
            player.join_player_group(ped);
        }
        player.set_player_group_friendly();
    }

    /// Marks every passenger as no longer needed and empties the group.
    pub fn release<W>(&mut self, world: &mut W)
    where
        W: EntityWorld + ?Sized,
    {
        for ped in self.passengers.drain(..) {
            world.mark_no_longer_needed(ped);
        }
    }
}
