//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod list;
mod simulate;

pub use inspect::Inspect;
pub use list::List;
pub use simulate::Simulate;

use std::path::PathBuf;

use clap::Args;
use mission_content::ContentFactory;
use mission_core::ModConfig;

pub const DATA_DIR_ENV: &str = "MISSION_DATA_DIR";

/// Location of the mod data files.
#[derive(Args)]
pub struct ContentArgs {
    /// Data directory holding bus_mod.toml and the missions file
    /// (defaults to $MISSION_DATA_DIR, then the current directory)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl ContentArgs {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Factory and configuration; a missing config file means defaults.
    pub fn load(&self) -> (ContentFactory, ModConfig) {
        let factory = ContentFactory::new(self.data_dir());
        let config = factory.load_config_or_default();
        (factory, config)
    }
}
