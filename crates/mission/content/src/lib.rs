//! Scenario records and mod configuration loaded from disk.
//!
//! This crate reads the externally authored data the mission runs on:
//! - Scenario records (XML, one `<element>` per scenario)
//! - The scenario catalog shown in the host menu
//! - Mod configuration (TOML, or the legacy single-line INI key binding)
//!
//! Content is consumed by the engine through [`mission_core::ScenarioSource`]
//! and never mutated at runtime.

pub mod loaders;
pub mod memory;

pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, ScenarioCatalog, ScenarioDataStore,
    ScenarioDocument, ScenarioView,
};
pub use memory::StaticScenarioSource;
