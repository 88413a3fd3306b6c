//! Mod configuration loader.

use std::path::Path;

use mission_core::ModConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for mod configuration.
///
/// Two formats are accepted:
/// - TOML with the fields of [`ModConfig`]
/// - The legacy single-line INI binding, `key=F10`, which only sets the menu key
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML or legacy INI file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    pub fn load(path: &Path) -> LoadResult<ModConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Like [`ConfigLoader::load`], but falls back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default(path: &Path) -> ModConfig {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("using default mod config: {:#}", err);
                ModConfig::default()
            }
        }
    }

    pub fn parse(content: &str) -> LoadResult<ModConfig> {
        match toml::from_str::<ModConfig>(content) {
            Ok(config) => Ok(config),
            Err(toml_err) => Self::parse_legacy(content).ok_or_else(|| {
                anyhow::anyhow!("Failed to parse config TOML: {}", toml_err)
            }),
        }
    }

    /// Reads the menu key from the first `name=value` line.
    fn parse_legacy(content: &str) -> Option<ModConfig> {
        let first = content.lines().next()?;
        let (_, key) = first.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(ModConfig {
            menu_key: key.to_string(),
            ..ModConfig::default()
        })
    }
}
