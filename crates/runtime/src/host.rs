//! Menu-driven glue between a host script and the mission engine.
//!
//! The host owns the engine and the scenario catalog. Key presses open the
//! menu, the menu selects and starts or cancels a scenario, and every frame
//! is forwarded to [`MissionEngine::tick`] while a mission is active.

use std::sync::{Arc, Mutex};

use mission_content::{ContentFactory, ScenarioCatalog};
use mission_core::{
    MissionEngine, MissionLog, ModConfig, PrepareOutcome, Screen, Simulation, TickOutcome,
};

use crate::error::{HostError, Result};
use crate::logging::{FileLogger, NoopLogger};

/// Messages waiting for the next frame's [`Screen::notify`].
type NoticeQueue = Arc<Mutex<Vec<String>>>;

/// Owns the engine and the menu state of one loaded mod.
pub struct MissionHost {
    engine: MissionEngine,
    catalog: ScenarioCatalog,
    menu_key: String,
    selected: usize,
    menu_open: bool,
    notices: NoticeQueue,
}

impl MissionHost {
    pub const LOADED_NOTIFICATION: &'static str = "Bus mod loaded";

    pub fn new(
        engine: MissionEngine,
        catalog: ScenarioCatalog,
        menu_key: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            catalog,
            menu_key: menu_key.into(),
            selected: 0,
            menu_open: false,
            notices: NoticeQueue::default(),
        }
    }

    /// Builds a host over the data directory layout of `factory`.
    ///
    /// Scenarios are read from the configured missions file; a configured
    /// log file enables the file logger, whose append failures are shown as
    /// notifications.
    pub fn from_config(factory: &ContentFactory, config: &ModConfig) -> Self {
        let notices = NoticeQueue::default();
        let log: Box<dyn MissionLog> = match &config.log_file {
            Some(path) => {
                let queue = Arc::clone(&notices);
                Box::new(
                    FileLogger::new(factory.data_dir().join(path)).with_failure_channel(
                        move |err| {
                            tracing::error!("{}", err);
                            if let Ok(mut queue) = queue.lock() {
                                queue.push(err.to_string());
                            }
                        },
                    ),
                )
            }
            None => Box::new(NoopLogger),
        };
        let engine = MissionEngine::new(Box::new(factory.scenario_store(config)), log)
            .with_config(config.mission.clone())
            .with_seed(config.seed);
        let mut host = Self::new(engine, factory.catalog(config), config.menu_key.clone());
        host.notices = notices;
        host
    }

    pub fn engine(&self) -> &MissionEngine {
        &self.engine
    }

    pub fn menu_key(&self) -> &str {
        &self.menu_key
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Shows the load notification.
    pub fn announce<S>(&self, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        screen.notify(Self::LOADED_NOTIFICATION);
    }

    /// Opens the menu when `key` is the menu key and the menu is closed.
    pub fn on_key(&mut self, key: &str) -> bool {
        if self.menu_open || !key.eq_ignore_ascii_case(&self.menu_key) {
            return false;
        }
        self.menu_open = true;
        true
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Scenario names for the menu.
    pub fn catalog(&mut self) -> &[String] {
        self.catalog.names()
    }

    /// Re-reads the scenario names on the next menu access.
    pub fn refresh_catalog(&mut self) {
        self.catalog.refresh();
    }

    pub fn select(&mut self, index: usize) -> Result<&str> {
        if self.is_active() {
            return Err(HostError::AlreadyActive);
        }
        let len = self.catalog.names().len();
        if index >= len {
            return Err(HostError::NoSuchScenario { index, len });
        }
        self.selected = index;
        self.catalog.get(index).ok_or(HostError::EmptyCatalog)
    }

    pub fn selected(&mut self) -> Option<&str> {
        self.catalog.get(self.selected)
    }

    /// Starts the selected scenario and closes the menu.
    pub fn start<S>(&mut self, sim: &mut S) -> Result<PrepareOutcome>
    where
        S: Simulation + ?Sized,
    {
        if self.is_active() {
            return Err(HostError::AlreadyActive);
        }
        let name = self
            .selected()
            .map(str::to_string)
            .ok_or(HostError::EmptyCatalog)?;
        self.menu_open = false;
        tracing::info!("starting scenario '{}'", name);
        let outcome = self.engine.prepare(sim, &name);
        self.flush_notices(sim);
        Ok(outcome)
    }

    /// Cancels the running mission and closes the menu.
    pub fn cancel<S>(&mut self, sim: &mut S) -> Result<()>
    where
        S: Simulation + ?Sized,
    {
        if !self.is_active() {
            return Err(HostError::NotActive);
        }
        self.menu_open = false;
        self.engine.cancel(sim);
        self.flush_notices(sim);
        Ok(())
    }

    /// Forwards one frame to the engine while a mission is active.
    ///
    /// Pending log failures are shown first, whether or not a mission runs.
    pub fn on_tick<S>(&mut self, sim: &mut S) -> TickOutcome
    where
        S: Simulation + ?Sized,
    {
        self.flush_notices(sim);
        if !self.is_active() {
            return TickOutcome::Idle;
        }
        let outcome = self.engine.tick(sim);
        self.flush_notices(sim);
        outcome
    }

    fn flush_notices<S>(&self, screen: &mut S)
    where
        S: Screen + ?Sized,
    {
        let pending = match self.notices.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => return,
        };
        for notice in pending {
            screen.notify(&notice);
        }
    }
}
