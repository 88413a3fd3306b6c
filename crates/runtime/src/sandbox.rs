//! In-memory simulation for headless runs and tests.
//!
//! [`SandboxWorld`] implements every collaborator trait the engine needs.
//! Nothing moves on its own: callers drive the vehicle, press controls and
//! kill entities explicitly. Waits are recorded instead of slept, and
//! subtitles and notifications are kept in order for inspection.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use mission_core::{
    BlipDisplay, BlipSprite, Control, ElementKind, EntityHandle, EntitySpawnSpec, EntityWorld,
    HostClock, MarkerColor, MarkerHandle, ModelId, PlayerState, Position, ScenarioRecord, Screen,
    SpawnError, VehicleSeat,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Ped,
    Vehicle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SandboxBlip {
    pub sprite: BlipSprite,
    pub route: bool,
    pub labelled: bool,
}

#[derive(Clone, Debug)]
pub struct SandboxEntity {
    pub kind: EntityKind,
    pub model: Option<ModelId>,
    pub position: Position,
    pub heading: f32,
    pub alive: bool,
    pub stopped: bool,
    pub invincible: bool,
    pub vehicle: Option<EntityHandle>,
    pub in_player_group: bool,
    pub released: bool,
    pub blip: Option<SandboxBlip>,
}

impl SandboxEntity {
    fn new(kind: EntityKind, model: Option<ModelId>, position: Position, heading: f32) -> Self {
        Self {
            kind,
            model,
            position,
            heading,
            alive: true,
            stopped: true,
            invincible: false,
            vehicle: None,
            in_player_group: false,
            released: false,
            blip: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SandboxMarker {
    pub position: Position,
    pub color: MarkerColor,
    pub route: bool,
    pub labelled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subtitle {
    pub text: String,
    pub duration: Option<Duration>,
}

pub struct SandboxWorld {
    entities: BTreeMap<EntityHandle, SandboxEntity>,
    markers: BTreeMap<MarkerHandle, SandboxMarker>,
    next_entity: u32,
    next_marker: u32,
    player: EntityHandle,
    money: i64,
    group_friendly: bool,
    pressed: HashSet<Control>,
    refused: HashSet<ElementKind>,
    subtitles: Vec<Subtitle>,
    notifications: Vec<String>,
    waits: Vec<Duration>,
}

impl SandboxWorld {
    pub fn new(money: i64) -> Self {
        let player = EntityHandle(1);
        let mut entities = BTreeMap::new();
        entities.insert(
            player,
            SandboxEntity::new(EntityKind::Player, None, Position::ORIGIN, 0.0),
        );
        Self {
            entities,
            markers: BTreeMap::new(),
            next_entity: player.0,
            next_marker: 0,
            player,
            money,
            group_friendly: false,
            pressed: HashSet::new(),
            refused: HashSet::new(),
            subtitles: Vec::new(),
            notifications: Vec::new(),
            waits: Vec::new(),
        }
    }

    /// Makes every later spawn of `kind` fail.
    pub fn refuse_spawns(&mut self, kind: ElementKind) {
        self.refused.insert(kind);
    }

    pub fn press(&mut self, control: Control) {
        self.pressed.insert(control);
    }

    pub fn release_controls(&mut self) {
        self.pressed.clear();
    }

    /// Moves a vehicle and everyone seated in it.
    pub fn drive_to(&mut self, vehicle: EntityHandle, position: Position) {
        for entity in self.entities.values_mut() {
            if entity.vehicle == Some(vehicle) {
                entity.position = position;
            }
        }
        if let Some(entity) = self.entities.get_mut(&vehicle) {
            entity.position = position;
        }
    }

    pub fn set_stopped(&mut self, entity: EntityHandle, stopped: bool) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.stopped = stopped;
        }
    }

    pub fn kill(&mut self, entity: EntityHandle) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.alive = false;
        }
    }

    /// Seats the player as the driver of `vehicle`.
    pub fn enter_as_driver(&mut self, vehicle: EntityHandle) {
        let player = self.player;
        self.set_into_vehicle(player, vehicle, VehicleSeat::Driver);
    }

    pub fn leave_vehicle(&mut self, entity: EntityHandle) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.vehicle = None;
        }
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&SandboxEntity> {
        self.entities.get(&handle)
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&SandboxMarker> {
        self.markers.get(&handle)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&MarkerHandle, &SandboxMarker)> {
        self.markers.iter()
    }

    /// Spawned entities the simulation still considers owned by a script.
    pub fn owned_entities(&self) -> impl Iterator<Item = (&EntityHandle, &SandboxEntity)> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.kind != EntityKind::Player && !entity.released)
    }

    pub fn subtitles(&self) -> &[Subtitle] {
        &self.subtitles
    }

    pub fn has_subtitle(&self, text: &str) -> bool {
        self.subtitles.iter().any(|subtitle| subtitle.text == text)
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn total_wait(&self) -> Duration {
        self.waits.iter().sum()
    }

    pub fn is_group_friendly(&self) -> bool {
        self.group_friendly
    }

    /// Distance between two entities, if both exist.
    pub fn distance(&self, a: EntityHandle, b: EntityHandle) -> Option<f32> {
        let a = self.entities.get(&a)?;
        let b = self.entities.get(&b)?;
        Some(a.position.distance_to(b.position))
    }

    fn spawn(
        &mut self,
        kind: EntityKind,
        element: ElementKind,
        spec: &EntitySpawnSpec,
    ) -> Result<EntityHandle, SpawnError> {
        if self.refused.contains(&element) {
            return Err(SpawnError::Rejected {
                kind: element,
                reason: "spawn refused by sandbox".into(),
            });
        }
        if spec.model.as_hash() == Some(ScenarioRecord::MISSING_NUMBER) {
            return Err(SpawnError::ModelUnavailable {
                kind: element,
                model: spec.model.to_string(),
            });
        }
        self.next_entity += 1;
        let handle = EntityHandle(self.next_entity);
        self.entities.insert(
            handle,
            SandboxEntity::new(kind, Some(spec.model.clone()), spec.position, spec.heading),
        );
        tracing::debug!("sandbox spawned {:?} {} at {}", kind, handle, spec.position);
        Ok(handle)
    }

    fn blip_mut(&mut self, entity: EntityHandle) -> Option<&mut SandboxBlip> {
        self.entities
            .get_mut(&entity)
            .and_then(|entity| entity.blip.as_mut())
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(0)
    }
}

impl EntityWorld for SandboxWorld {
    fn spawn_ped(&mut self, spec: &EntitySpawnSpec) -> Result<EntityHandle, SpawnError> {
        self.spawn(EntityKind::Ped, ElementKind::Passenger, spec)
    }

    fn spawn_vehicle(&mut self, spec: &EntitySpawnSpec) -> Result<EntityHandle, SpawnError> {
        self.spawn(EntityKind::Vehicle, ElementKind::Vehicle, spec)
    }

    fn position(&self, entity: EntityHandle) -> Position {
        self.entities
            .get(&entity)
            .map(|entity| entity.position)
            .unwrap_or(Position::ORIGIN)
    }

    fn set_position(&mut self, entity: EntityHandle, position: Position) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.position = position;
            entity.vehicle = None;
        }
    }

    fn is_alive(&self, entity: EntityHandle) -> bool {
        self.entities.get(&entity).is_some_and(|entity| entity.alive)
    }

    fn is_stopped(&self, entity: EntityHandle) -> bool {
        self.entities.get(&entity).is_some_and(|entity| entity.stopped)
    }

    fn set_invincible(&mut self, entity: EntityHandle, invincible: bool) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.invincible = invincible;
        }
    }

    fn is_in_vehicle(&self, ped: EntityHandle, vehicle: EntityHandle) -> bool {
        self.entities
            .get(&ped)
            .is_some_and(|ped| ped.vehicle == Some(vehicle))
    }

    fn set_into_vehicle(&mut self, ped: EntityHandle, vehicle: EntityHandle, _seat: VehicleSeat) {
        let Some(position) = self.entities.get(&vehicle).map(|v| v.position) else {
            return;
        };
        if let Some(ped) = self.entities.get_mut(&ped) {
            ped.vehicle = Some(vehicle);
            ped.position = position;
        }
    }

    fn mark_no_longer_needed(&mut self, entity: EntityHandle) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.released = true;
        }
    }
}

impl BlipDisplay for SandboxWorld {
    fn add_blip(&mut self, entity: EntityHandle) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.blip = Some(SandboxBlip {
                labelled: true,
                ..SandboxBlip::default()
            });
        }
    }

    fn set_blip_sprite(&mut self, entity: EntityHandle, sprite: BlipSprite) {
        if let Some(blip) = self.blip_mut(entity) {
            blip.sprite = sprite;
        }
    }

    fn remove_blip_label(&mut self, entity: EntityHandle) {
        if let Some(blip) = self.blip_mut(entity) {
            blip.labelled = false;
        }
    }

    fn set_blip_route(&mut self, entity: EntityHandle, visible: bool) {
        if let Some(blip) = self.blip_mut(entity) {
            blip.route = visible;
        }
    }

    fn delete_blip(&mut self, entity: EntityHandle) {
        if let Some(entity) = self.entities.get_mut(&entity) {
            entity.blip = None;
        }
    }

    fn create_marker(
        &mut self,
        position: Position,
        color: MarkerColor,
    ) -> Result<MarkerHandle, SpawnError> {
        if self.refused.contains(&ElementKind::Destination) {
            return Err(SpawnError::InvalidPlacement {
                kind: ElementKind::Destination,
                position,
            });
        }
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.markers.insert(
            handle,
            SandboxMarker {
                position,
                color,
                route: false,
                labelled: true,
            },
        );
        Ok(handle)
    }

    fn set_marker_route(&mut self, marker: MarkerHandle, visible: bool) {
        if let Some(marker) = self.markers.get_mut(&marker) {
            marker.route = visible;
        }
    }

    fn remove_marker_label(&mut self, marker: MarkerHandle) {
        if let Some(marker) = self.markers.get_mut(&marker) {
            marker.labelled = false;
        }
    }

    fn delete_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }
}

impl PlayerState for SandboxWorld {
    fn player(&self) -> EntityHandle {
        self.player
    }

    fn is_control_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn money(&self) -> i64 {
        self.money
    }

    fn set_money(&mut self, amount: i64) {
        self.money = amount;
    }

    fn join_player_group(&mut self, ped: EntityHandle) {
        if let Some(ped) = self.entities.get_mut(&ped) {
            ped.in_player_group = true;
        }
    }

    fn set_player_group_friendly(&mut self) {
        self.group_friendly = true;
    }
}

impl Screen for SandboxWorld {
    fn show_subtitle(&mut self, text: &str, duration: Option<Duration>) {
        tracing::debug!("subtitle: {}", text);
        self.subtitles.push(Subtitle {
            text: text.to_string(),
            duration,
        });
    }

    fn notify(&mut self, text: &str) {
        self.notifications.push(text.to_string());
    }
}

impl HostClock for SandboxWorld {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
