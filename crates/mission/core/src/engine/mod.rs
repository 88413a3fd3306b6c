//! Mission lifecycle state machine.
//!
//! The [`MissionEngine`] is the sole owner of the entities spawned for a run:
//! the passenger group, the vehicle and the destination marker. Hosts drive
//! it with three calls:
//!
//! - [`MissionEngine::prepare`] resolves a scenario and spawns the run
//! - [`MissionEngine::tick`] evaluates the run once per simulation frame
//! - [`MissionEngine::cancel`] aborts a running mission with a penalty
//!
//! `prepare` and the failure path suspend the caller through
//! [`HostClock::wait`]; the host must not call into the engine again until
//! they return. `tick` itself never waits on the happy path.

pub mod messages;
mod outcome;

pub use outcome::{PrepareOutcome, TickOutcome};

use crate::config::MissionConfig;
use crate::env::{
    BlipSprite, Control, MarkerColor, MissionLog, PcgRng, ScenarioSource, Simulation, compute_seed,
};
use crate::error::{MissionError, SetupStep, SpawnError};
use crate::passengers::PassengerGroup;
use crate::state::{EntityHandle, MarkerHandle, MissionPhase, Position, ScenarioRecord};

/// Entities and data owned by one mission run.
#[derive(Debug)]
struct MissionRun {
    scenario: ScenarioRecord,
    passengers: PassengerGroup,
    vehicle: Option<EntityHandle>,
    destination: Option<MarkerHandle>,
    cleaned_up: bool,
}

impl MissionRun {
    fn new(scenario: ScenarioRecord) -> Self {
        Self {
            scenario,
            passengers: PassengerGroup::new(),
            vehicle: None,
            destination: None,
            cleaned_up: false,
        }
    }
}

/// Drives one mission run at a time over a [`Simulation`].
///
/// The engine reads scenarios from its [`ScenarioSource`] and reports
/// progress to its [`MissionLog`]. Entity cleanup only happens on the way
/// into a terminal phase or when a new run replaces the old one.
pub struct MissionEngine {
    config: MissionConfig,
    source: Box<dyn ScenarioSource>,
    log: Box<dyn MissionLog>,
    rng: PcgRng,
    seed: u64,
    draws: u64,
    phase: MissionPhase,
    run: Option<MissionRun>,
}

impl MissionEngine {
    pub fn new(source: Box<dyn ScenarioSource>, log: Box<dyn MissionLog>) -> Self {
        Self {
            config: MissionConfig::default(),
            source,
            log,
            rng: PcgRng,
            seed: 0,
            draws: 0,
            phase: MissionPhase::Idle,
            run: None,
        }
    }

    pub fn with_config(mut self, config: MissionConfig) -> Self {
        self.config = config;
        self
    }

    /// Base seed for passenger scattering.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// True while the host should keep calling [`Self::tick`].
    pub fn is_active(&self) -> bool {
        self.phase.is_running()
    }

    /// Scenario of the current (or last) run.
    pub fn scenario(&self) -> Option<&ScenarioRecord> {
        self.run.as_ref().map(|run| &run.scenario)
    }

    pub fn passengers(&self) -> Option<&PassengerGroup> {
        self.run.as_ref().map(|run| &run.passengers)
    }

    /// Vehicle handle, until cleanup hands it back.
    pub fn vehicle(&self) -> Option<EntityHandle> {
        self.run.as_ref().and_then(|run| run.vehicle)
    }

    /// Destination marker, until cleanup deletes it.
    pub fn destination(&self) -> Option<MarkerHandle> {
        self.run.as_ref().and_then(|run| run.destination)
    }

    /// Resolves `name` and spawns a new run.
    ///
    /// Any previous run is discarded first. Setup failures are reported on
    /// screen and listed in the outcome; the mission still starts with what
    /// could be created.
    pub fn prepare<S>(&mut self, sim: &mut S, name: &str) -> PrepareOutcome
    where
        S: Simulation + ?Sized,
    {
        self.log.log(&format!("preparing mission '{name}'"));

        let resolved = match self.source.resolve(name) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!("[{}] {}", err.error_code(), err);
                self.log.log(&format!("{}: {}", err.error_code(), err));
                sim.show_subtitle(&err.to_string(), None);
                self.discard_run(sim);
                self.phase = MissionPhase::Idle;
                return PrepareOutcome::Unresolved(err);
            }
        };
        for diagnostic in &resolved.diagnostics {
            tracing::warn!("scenario '{}': {}", name, diagnostic);
            self.log.log(diagnostic);
            sim.show_subtitle(diagnostic, None);
        }

        self.discard_run(sim);
        self.phase = MissionPhase::Preparing;

        let line = self.config.description_line();
        for text in &resolved.record.description {
            sim.show_subtitle(text, Some(line));
            sim.wait(line);
        }

        let mut run = MissionRun::new(resolved.record);
        let mut failed = Vec::new();
        if let Err(err) = setup_passengers(&mut run, sim) {
            self.report_setup_error(sim, SetupStep::Passengers, &err);
            failed.push(SetupStep::Passengers);
        }
        if let Err(err) = setup_vehicle(&mut run, sim) {
            self.report_setup_error(sim, SetupStep::Vehicle, &err);
            failed.push(SetupStep::Vehicle);
        }
        if let Err(err) = setup_destination(&mut run, sim) {
            self.report_setup_error(sim, SetupStep::Destination, &err);
            failed.push(SetupStep::Destination);
        }

        tracing::info!(
            "mission '{}' awaiting pickup: {} passengers, vehicle {:?}, {} failed steps",
            name,
            run.passengers.len(),
            run.vehicle,
            failed.len()
        );
        self.run = Some(run);
        self.phase = MissionPhase::AwaitingPickup;

        if failed.is_empty() {
            PrepareOutcome::Ready
        } else {
            PrepareOutcome::Partial(failed)
        }
    }

    /// Evaluates the running mission once.
    pub fn tick<S>(&mut self, sim: &mut S) -> TickOutcome
    where
        S: Simulation + ?Sized,
    {
        if !self.phase.is_running() {
            return TickOutcome::Idle;
        }
        let Some(run) = self.run.as_ref().filter(|run| !run.cleaned_up) else {
            return TickOutcome::Idle;
        };
        let vehicle = run.vehicle;
        let destination = run.destination;
        let target = run.scenario.destination;
        let first = run.passengers.first();
        let player = sim.player();

        if let Some(vehicle) = vehicle {
            if sim.is_in_vehicle(player, vehicle) {
                sim.set_invincible(vehicle, false);
            }
        }

        let any_dead = run.passengers.any_dead(&*sim);
        let vehicle = match vehicle {
            Some(vehicle) if !any_dead && sim.is_alive(vehicle) => vehicle,
            _ => {
                tracing::info!("mission failed (passenger dead: {})", any_dead);
                self.fail(sim);
                return TickOutcome::Failed;
            }
        };

        // Route display. The passenger rule runs last and owns the
        // destination route when both rules touch it.
        if sim.is_in_vehicle(player, vehicle) {
            sim.set_blip_route(vehicle, false);
        } else {
            sim.set_blip_route(vehicle, true);
            if let Some(marker) = destination {
                sim.set_marker_route(marker, false);
            }
        }
        let any_outside = run.passengers.any_outside_vehicle(&*sim, vehicle);
        if let Some(first) = first {
            sim.set_blip_route(first, any_outside);
        }
        if let Some(marker) = destination {
            sim.set_marker_route(marker, !any_outside);
        }

        let horn = sim.is_control_pressed(Control::VehicleHorn);
        let stopped = sim.is_stopped(vehicle);
        let vehicle_position = sim.position(vehicle);
        let to_destination = vehicle_position.distance_to(target);

        if let Some(first) = first {
            let near_passengers =
                vehicle_position.distance_to(sim.position(first)) <= self.config.pickup_distance;
            let clear_of_destination = to_destination >= self.config.min_distance_from_destination;
            if any_outside && near_passengers && stopped && horn && clear_of_destination {
                self.pick_up(sim, vehicle);
                return TickOutcome::Running;
            }
        }

        if to_destination <= self.config.destination_distance && stopped && horn {
            self.deliver(sim, vehicle_position);
            return TickOutcome::Completed;
        }

        TickOutcome::Running
    }

    /// Aborts a running mission with the penalty applied.
    ///
    /// Does nothing when no mission is running.
    pub fn cancel<S>(&mut self, sim: &mut S)
    where
        S: Simulation + ?Sized,
    {
        if !self.phase.is_running() {
            tracing::debug!("cancel ignored in phase {}", self.phase);
            return;
        }
        sim.show_subtitle(messages::CANCELLED, Some(self.config.cancellation_message()));
        self.cleanup(sim, true);
        self.phase = MissionPhase::Cancelled;
        self.log.log("mission cancelled");
        tracing::info!("mission cancelled");
    }

    /// Releases everything the current run owns.
    ///
    /// Passengers are scattered around the vehicle and released, the
    /// destination marker is deleted and the vehicle is handed back. With
    /// `apply_penalty` the scenario reward is subtracted from the player's
    /// balance. Runs at most once per run.
    fn cleanup<S>(&mut self, sim: &mut S, apply_penalty: bool)
    where
        S: Simulation + ?Sized,
    {
        let draw = self.next_draw();
        let seed = self.seed;
        let radius = self.config.cleanup_scatter_radius;
        let Some(run) = self.run.as_mut().filter(|run| !run.cleaned_up) else {
            return;
        };
        run.cleaned_up = true;

        run.passengers.remove_blip_labels(sim);
        if let Some(vehicle) = run.vehicle {
            let center = sim.position(vehicle);
            run.passengers
                .scatter_around(sim, &self.rng, center, radius, |ped| {
                    compute_seed(seed, draw, ped)
                });
        }
        run.passengers.release(sim);

        if apply_penalty {
            let penalty = i64::from(run.scenario.reward);
            let balance = sim.money();
            sim.set_money(balance - penalty);
            self.log.log(&format!("penalty of {penalty} applied"));
        }

        if let Some(marker) = run.destination.take() {
            sim.remove_marker_label(marker);
            sim.set_marker_route(marker, false);
            sim.delete_marker(marker);
        }
        if let Some(vehicle) = run.vehicle.take() {
            sim.remove_blip_label(vehicle);
            sim.delete_blip(vehicle);
            sim.mark_no_longer_needed(vehicle);
        }
        tracing::debug!("cleanup done for '{}'", run.scenario.name);
    }

    fn pick_up<S>(&mut self, sim: &mut S, vehicle: EntityHandle)
    where
        S: Simulation + ?Sized,
    {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        run.passengers.set_invincible(sim, false);
        run.passengers.enter_vehicle(sim, vehicle);
        sim.show_subtitle(messages::PICKUP, None);
        self.phase = MissionPhase::Transporting;
        self.log.log("passengers picked up");
        tracing::info!("passengers picked up");
    }

    fn deliver<S>(&mut self, sim: &mut S, drop_off: Position)
    where
        S: Simulation + ?Sized,
    {
        let draw = self.next_draw();
        let seed = self.seed;
        if let Some(run) = self.run.as_ref() {
            run.passengers.scatter_around(
                sim,
                &self.rng,
                drop_off,
                self.config.delivery_scatter_radius,
                |ped| compute_seed(seed, draw, ped),
            );
        }
        sim.show_subtitle(messages::COMPLETED, Some(self.config.completion_message()));
        self.cleanup(sim, false);
        self.phase = MissionPhase::Completed;
        self.log.log("mission completed");
        tracing::info!("mission completed");
    }

    fn fail<S>(&mut self, sim: &mut S)
    where
        S: Simulation + ?Sized,
    {
        let pause = self.config.failure_message();
        sim.show_subtitle(messages::FAILED, Some(pause));
        sim.wait(pause);
        sim.show_subtitle(messages::FAILED_INSULT, Some(pause));
        self.cleanup(sim, true);
        self.phase = MissionPhase::Failed;
        self.log.log("mission failed");
    }

    /// Drops the previous run, releasing anything it still owns.
    fn discard_run<S>(&mut self, sim: &mut S)
    where
        S: Simulation + ?Sized,
    {
        if self.run.is_some() {
            self.cleanup(sim, false);
            self.run = None;
        }
    }

    fn report_setup_error<S>(&self, sim: &mut S, step: SetupStep, err: &SpawnError)
    where
        S: Simulation + ?Sized,
    {
        let message = format!("{}: {}", step.error_code(), err);
        tracing::warn!("{} ({})", message, err.severity().as_str());
        self.log.log(&message);
        sim.show_subtitle(&message, None);
    }

    fn next_draw(&mut self) -> u64 {
        self.draws += 1;
        self.draws
    }
}

fn setup_passengers<S>(run: &mut MissionRun, sim: &mut S) -> Result<(), SpawnError>
where
    S: Simulation + ?Sized,
{
    run.passengers.spawn(sim, &run.scenario.passengers)?;
    run.passengers.set_invincible(sim, true);
    run.passengers.add_blips(sim);
    run.passengers.set_blip_sprite(sim, BlipSprite::Friend);
    run.passengers.set_player_relationship(sim);
    Ok(())
}

fn setup_vehicle<S>(run: &mut MissionRun, sim: &mut S) -> Result<(), SpawnError>
where
    S: Simulation + ?Sized,
{
    let vehicle = sim.spawn_vehicle(&run.scenario.vehicle)?;
    run.vehicle = Some(vehicle);
    sim.add_blip(vehicle);
    sim.set_blip_sprite(vehicle, BlipSprite::Cab);
    sim.set_blip_route(vehicle, true);
    sim.set_invincible(vehicle, true);
    Ok(())
}

fn setup_destination<S>(run: &mut MissionRun, sim: &mut S) -> Result<(), SpawnError>
where
    S: Simulation + ?Sized,
{
    let marker = sim.create_marker(run.scenario.destination, MarkerColor::Yellow)?;
    run.destination = Some(marker);
    Ok(())
}
