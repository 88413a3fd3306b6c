//! Content factory for building scenario sources from data files.

use std::path::{Path, PathBuf};

use mission_core::ModConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioCatalog, ScenarioDataStore};

/// Content factory that locates all mod content in a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── bus_mod.toml          (or the legacy bus_mod.ini)
/// └── bus_mod_missions.xml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "bus_mod.toml";
    pub const LEGACY_CONFIG_FILE: &'static str = "bus_mod.ini";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the configuration file; the TOML file wins when both exist.
    pub fn config_path(&self) -> PathBuf {
        let toml = self.data_dir.join(Self::CONFIG_FILE);
        let legacy = self.data_dir.join(Self::LEGACY_CONFIG_FILE);
        if !toml.exists() && legacy.exists() {
            legacy
        } else {
            toml
        }
    }

    /// Load mod configuration.
    pub fn load_config(&self) -> LoadResult<ModConfig> {
        ConfigLoader::load(&self.config_path())
    }

    /// Load mod configuration, or defaults when no file is present.
    pub fn load_config_or_default(&self) -> ModConfig {
        ConfigLoader::load_or_default(&self.config_path())
    }

    pub fn missions_path(&self, config: &ModConfig) -> PathBuf {
        self.data_dir.join(&config.missions_file)
    }

    pub fn scenario_store(&self, config: &ModConfig) -> ScenarioDataStore {
        ScenarioDataStore::new(self.missions_path(config))
    }

    pub fn catalog(&self, config: &ModConfig) -> ScenarioCatalog {
        ScenarioCatalog::new(self.missions_path(config))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
