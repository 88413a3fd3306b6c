use std::time::Duration;

use mission_content::{ScenarioDataStore, StaticScenarioSource};
use mission_core::engine::messages;
use mission_core::{
    BlipSprite, Control, EntityHandle, EntitySpawnSpec, EntityWorld, MissionEngine, MissionPhase,
    ModelId, PlayerState, Position, PrepareOutcome, ScenarioError, ScenarioRecord, SetupStep,
    TickOutcome,
};
use mission_runtime::{FileLogger, NoopLogger, SandboxWorld};

const STARTING_MONEY: i64 = 1_000;
const REWARD: i32 = 150;

fn record(name: &str, destination: Position) -> ScenarioRecord {
    ScenarioRecord {
        name: name.to_string(),
        description: vec!["Two tourists need a lift.".into(), "Be gentle.".into()],
        passengers: vec![
            EntitySpawnSpec::new(ModelId::Hash(1830688247), Position::new(0.0, 0.0, 0.0), 90.0),
            EntitySpawnSpec::new(ModelId::Hash(-1038739309), Position::new(2.0, 0.0, 0.0), 90.0),
        ],
        vehicle: EntitySpawnSpec::new(
            ModelId::Name("bus".into()),
            Position::new(300.0, 0.0, 0.0),
            0.0,
        ),
        destination,
        reward: REWARD,
    }
}

fn engine_with(records: Vec<ScenarioRecord>) -> MissionEngine {
    MissionEngine::new(
        Box::new(StaticScenarioSource::new(records)),
        Box::new(NoopLogger),
    )
}

/// Prepares `record` and parks the bus, with the player driving, at `bus_at`.
fn prepared(record: ScenarioRecord, bus_at: Position) -> (MissionEngine, SandboxWorld, EntityHandle) {
    let name = record.name.clone();
    let mut engine = engine_with(vec![record]);
    let mut world = SandboxWorld::new(STARTING_MONEY);

    assert_eq!(engine.prepare(&mut world, &name), PrepareOutcome::Ready);
    let bus = engine.vehicle().unwrap();
    world.enter_as_driver(bus);
    world.drive_to(bus, bus_at);
    (engine, world, bus)
}

fn passengers(engine: &MissionEngine) -> Vec<EntityHandle> {
    engine.passengers().unwrap().handles().to_vec()
}

/// Complete delivery run:
/// 1. Prepare plays the description and spawns two passengers, the bus and the marker
/// 2. The bus stops 25 units from the first passenger, 80 from the destination
/// 3. Horn triggers the pickup; everyone boards
/// 4. The bus stops at the destination; horn triggers delivery and cleanup
#[test]
fn test_complete_delivery() {
    let destination = Position::new(105.0, 0.0, 0.0);
    let (mut engine, mut world, bus) =
        prepared(record("Airport run", destination), Position::new(25.0, 0.0, 0.0));
    let riders = passengers(&engine);

    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);
    assert_eq!(world.waits(), [Duration::from_millis(4000); 2]);
    for line in ["Two tourists need a lift.", "Be gentle."] {
        let subtitle = world.subtitles().iter().find(|subtitle| subtitle.text == line).unwrap();
        assert_eq!(subtitle.duration, Some(Duration::from_millis(4000)));
    }
    assert!(world.entity(bus).unwrap().invincible);
    for &ped in &riders {
        let entity = world.entity(ped).unwrap();
        assert!(entity.invincible);
        assert!(entity.in_player_group);
        assert_eq!(entity.blip.as_ref().unwrap().sprite, BlipSprite::Friend);
    }
    assert!(world.is_group_friendly());
    assert_eq!(world.entity(bus).unwrap().blip.as_ref().unwrap().sprite, BlipSprite::Cab);

    // Pickup
    world.press(Control::VehicleHorn);
    let outcome = engine.tick(&mut world);
    assert_eq!(outcome, TickOutcome::Running);
    assert!(outcome.is_active());
    assert_eq!(engine.phase(), MissionPhase::Transporting);
    assert!(world.has_subtitle(messages::PICKUP));
    assert!(!world.entity(bus).unwrap().invincible);
    for &ped in &riders {
        assert!(world.is_in_vehicle(ped, bus));
        assert!(!world.entity(ped).unwrap().invincible);
    }

    // Delivery
    world.drive_to(bus, Position::new(100.0, 0.0, 0.0));
    let outcome = engine.tick(&mut world);
    assert_eq!(outcome, TickOutcome::Completed);
    assert!(!outcome.is_active());
    assert!(!engine.is_active());
    assert_eq!(engine.phase(), MissionPhase::Completed);
    let completed = world.subtitles().last().unwrap();
    assert_eq!(completed.text, messages::COMPLETED);
    assert_eq!(completed.duration, Some(Duration::from_millis(4000)));
    assert_eq!(world.money(), STARTING_MONEY);

    for &ped in &riders {
        let entity = world.entity(ped).unwrap();
        assert!(entity.released);
        assert!(entity.vehicle.is_none());
        assert!(entity.position.distance_to(Position::new(100.0, 0.0, 0.0)) <= 3.0 + 1e-3);
    }
    assert!(world.entity(bus).unwrap().released);
    assert!(world.entity(bus).unwrap().blip.is_none());
    assert_eq!(world.owned_entities().count(), 0);
    assert_eq!(world.markers().count(), 0);

    assert_eq!(engine.tick(&mut world), TickOutcome::Idle);
}

#[test]
fn pickup_suppressed_near_destination() {
    // 40 units out: too close for a pickup, too far for a delivery.
    let (mut engine, mut world, bus) = prepared(
        record("Short hop", Position::new(65.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    world.press(Control::VehicleHorn);

    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);
    assert!(!world.has_subtitle(messages::PICKUP));
    for ped in passengers(&engine) {
        assert!(!world.is_in_vehicle(ped, bus));
    }
}

#[test]
fn pickup_suppressed_within_delivery_range() {
    // 20 units out: the pickup is refused, the delivery check still runs.
    let (mut engine, mut world, _bus) = prepared(
        record("Shorter hop", Position::new(45.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    world.press(Control::VehicleHorn);

    let outcome = engine.tick(&mut world);
    assert!(!world.has_subtitle(messages::PICKUP));
    assert_ne!(engine.phase(), MissionPhase::Transporting);
    assert_eq!(outcome, TickOutcome::Completed);
}

#[test]
fn no_pickup_without_horn_or_while_moving() {
    let (mut engine, mut world, bus) = prepared(
        record("Airport run", Position::new(105.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );

    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);

    world.press(Control::VehicleHorn);
    world.set_stopped(bus, false);
    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);

    world.drive_to(bus, Position::new(40.0, 0.0, 0.0));
    world.set_stopped(bus, true);
    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);
}

#[test]
fn passenger_death_fails_with_penalty() {
    let (mut engine, mut world, _bus) = prepared(
        record("Airport run", Position::new(105.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    let riders = passengers(&engine);
    world.kill(riders[1]);

    let outcome = engine.tick(&mut world);
    assert_eq!(outcome, TickOutcome::Failed);
    assert!(!outcome.is_active());
    assert_eq!(engine.phase(), MissionPhase::Failed);
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
    assert!(world.has_subtitle(messages::FAILED));
    assert!(world.has_subtitle(messages::FAILED_INSULT));
    assert_eq!(world.waits().last(), Some(&Duration::from_millis(3500)));
    assert_eq!(world.owned_entities().count(), 0);

    assert_eq!(engine.tick(&mut world), TickOutcome::Idle);
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
}

#[test]
fn destroyed_vehicle_fails_mission() {
    let (mut engine, mut world, bus) = prepared(
        record("Airport run", Position::new(105.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    world.kill(bus);
    assert_eq!(engine.tick(&mut world), TickOutcome::Failed);
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
}

#[test]
fn cancel_releases_everything_with_penalty() {
    let (mut engine, mut world, _bus) = prepared(
        record("Airport run", Position::new(105.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);

    engine.cancel(&mut world);

    assert_eq!(engine.phase(), MissionPhase::Cancelled);
    assert!(engine.phase().is_terminal());
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
    assert_eq!(world.owned_entities().count(), 0);
    assert_eq!(world.markers().count(), 0);
    let cancelled = world.subtitles().last().unwrap();
    assert_eq!(cancelled.text, messages::CANCELLED);
    assert_eq!(cancelled.duration, Some(Duration::from_millis(8000)));

    engine.cancel(&mut world);
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
}

#[test]
fn terminal_cleanup_penalizes_once() {
    let (mut engine, mut world, _bus) = prepared(
        record("Airport run", Position::new(105.0, 0.0, 0.0)),
        Position::new(25.0, 0.0, 0.0),
    );
    world.kill(passengers(&engine)[0]);

    assert_eq!(engine.tick(&mut world), TickOutcome::Failed);
    let failures = world.subtitles().len();
    let waits = world.waits().len();

    // Neither a late cancel nor further frames touch the cleaned-up run.
    engine.cancel(&mut world);
    assert_eq!(engine.phase(), MissionPhase::Failed);
    assert_eq!(engine.tick(&mut world), TickOutcome::Idle);
    assert_eq!(world.money(), STARTING_MONEY - i64::from(REWARD));
    assert_eq!(world.subtitles().len(), failures);
    assert_eq!(world.waits().len(), waits);
}

#[test]
fn missing_reward_penalty_uses_sentinel() {
    let mut scenario = record("Unpaid", Position::new(105.0, 0.0, 0.0));
    scenario.reward = ScenarioRecord::MISSING_REWARD;
    let (mut engine, mut world, _bus) = prepared(scenario, Position::new(25.0, 0.0, 0.0));

    engine.cancel(&mut world);
    assert_eq!(world.money(), STARTING_MONEY + 1);
}

#[test]
fn unknown_scenario_spawns_nothing() {
    let mut engine = engine_with(vec![record("Airport run", Position::ORIGIN)]);
    let mut world = SandboxWorld::new(STARTING_MONEY);

    let outcome = engine.prepare(&mut world, "Nowhere");

    assert_eq!(
        outcome,
        PrepareOutcome::Unresolved(ScenarioError::NotFound {
            name: "Nowhere".into()
        })
    );
    assert!(!outcome.is_running());
    assert_eq!(engine.phase(), MissionPhase::Idle);
    assert_eq!(world.owned_entities().count(), 0);
    assert_eq!(world.markers().count(), 0);
    assert!(world.waits().is_empty());
    assert!(world.has_subtitle("scenario 'Nowhere' not found"));
    assert_eq!(engine.tick(&mut world), TickOutcome::Idle);
}

#[test]
fn failed_vehicle_spawn_still_starts_mission() {
    let mut engine = engine_with(vec![record("Airport run", Position::new(105.0, 0.0, 0.0))]);
    let mut world = SandboxWorld::new(STARTING_MONEY);
    world.refuse_spawns(mission_core::ElementKind::Vehicle);

    let outcome = engine.prepare(&mut world, "Airport run");

    assert_eq!(outcome, PrepareOutcome::Partial(vec![SetupStep::Vehicle]));
    assert!(outcome.is_running());
    assert_eq!(engine.phase(), MissionPhase::AwaitingPickup);
    assert_eq!(engine.passengers().unwrap().len(), 2);
    assert!(
        world
            .subtitles()
            .iter()
            .any(|subtitle| subtitle.text.starts_with("VEHICLE_ERROR: "))
    );

    // Without a vehicle the first tick ends the run.
    assert_eq!(engine.tick(&mut world), TickOutcome::Failed);
    assert_eq!(world.owned_entities().count(), 0);
}

#[test]
fn route_display_follows_boarding() {
    let mut engine = engine_with(vec![record("Airport run", Position::new(105.0, 0.0, 0.0))]);
    let mut world = SandboxWorld::new(STARTING_MONEY);
    engine.prepare(&mut world, "Airport run");
    let bus = engine.vehicle().unwrap();
    let marker = engine.destination().unwrap();
    let first = passengers(&engine)[0];
    let route = |world: &SandboxWorld, entity| world.entity(entity).unwrap().blip.as_ref().unwrap().route;

    // Player on foot, passengers waiting.
    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert!(route(&world, bus));
    assert!(route(&world, first));
    assert!(!world.marker(marker).unwrap().route);

    // Player driving, passengers aboard.
    world.enter_as_driver(bus);
    world.drive_to(bus, Position::new(25.0, 0.0, 0.0));
    world.press(Control::VehicleHorn);
    engine.tick(&mut world);
    world.release_controls();
    assert_eq!(engine.tick(&mut world), TickOutcome::Running);
    assert!(!route(&world, bus));
    assert!(!route(&world, first));
    assert!(world.marker(marker).unwrap().route);
}

#[test]
fn preparing_again_discards_previous_run() {
    let mut engine = engine_with(vec![
        record("First", Position::new(105.0, 0.0, 0.0)),
        record("Second", Position::new(205.0, 0.0, 0.0)),
    ]);
    let mut world = SandboxWorld::new(STARTING_MONEY);

    engine.prepare(&mut world, "First");
    let first_bus = engine.vehicle().unwrap();
    engine.prepare(&mut world, "Second");

    assert!(world.entity(first_bus).unwrap().released);
    assert_ne!(engine.vehicle(), Some(first_bus));
    assert_eq!(world.markers().count(), 1);
    assert_eq!(world.owned_entities().count(), 3);
    assert_eq!(world.money(), STARTING_MONEY);
}

#[test]
fn same_seed_scatters_identically() {
    let run = || {
        let (engine, mut world, _bus) = prepared(
            record("Airport run", Position::new(105.0, 0.0, 0.0)),
            Position::new(25.0, 0.0, 0.0),
        );
        let mut engine = engine.with_seed(7);
        let riders = passengers(&engine);
        engine.cancel(&mut world);
        riders
            .iter()
            .map(|&ped| world.position(ped))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn xml_scenario_with_faults_degrades_to_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let missions = dir.path().join("bus_mod_missions.xml");
    std::fs::write(
        &missions,
        r#"<missions>
  <element>
    <name>Broken coords</name>
    <description>Watch out.</description>
    <ped><hash>1830688247</hash><position><x>1</x><y>bad</y><z>3</z><t>0</t></position></ped>
    <vehicle><position><x>10</x><y>0</y><z>0</z><t>0</t></position></vehicle>
    <destination><position><x>400</x><y>0</y><z>0</z></position></destination>
    <money><ammount>75</ammount></money>
  </element>
</missions>"#,
    )
    .unwrap();
    let log_path = dir.path().join(FileLogger::DEFAULT_FILE_NAME);
    let mut engine = MissionEngine::new(
        Box::new(ScenarioDataStore::new(&missions)),
        Box::new(FileLogger::new(&log_path)),
    );
    let mut world = SandboxWorld::new(STARTING_MONEY);

    assert_eq!(engine.prepare(&mut world, "Broken coords"), PrepareOutcome::Ready);

    let ped = passengers(&engine)[0];
    assert_eq!(world.position(ped), Position::new(1.0, 100_000.0, 3.0));
    assert_eq!(
        world.entity(engine.vehicle().unwrap()).unwrap().model,
        Some(ModelId::Name("bus".into()))
    );
    assert_eq!(engine.scenario().unwrap().reward, 75);
    assert!(world.has_subtitle("GET_COORDINATE_ERROR: ped 0 y"));
    assert!(world.has_subtitle("GET_VEHICLE_HASH_ERROR: 0"));

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("preparing mission 'Broken coords'"));
    assert!(log.contains("GET_COORDINATE_ERROR: ped 0 y"));
}

#[test]
fn unreadable_data_source_reports_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = MissionEngine::new(
        Box::new(ScenarioDataStore::new(dir.path().join("missing.xml"))),
        Box::new(NoopLogger),
    );
    let mut world = SandboxWorld::default();

    let outcome = engine.prepare(&mut world, "Anything");

    assert!(matches!(outcome, PrepareOutcome::Unresolved(ScenarioError::Load { .. })));
    assert!(
        world
            .subtitles()
            .iter()
            .any(|subtitle| subtitle.text.starts_with("Failed to load missions.xml: "))
    );
    assert_eq!(world.owned_entities().count(), 0);
}
