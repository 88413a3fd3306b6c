//! List scenario names

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use mission_content::ScenarioCatalog;

use super::ContentArgs;

/// List scenario names in document order
#[derive(Parser)]
pub struct List {
    #[command(flatten)]
    content: ContentArgs,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let (factory, config) = self.content.load();
        let path = factory.missions_path(&config);
        let names = ScenarioCatalog::load(&path)
            .with_context(|| format!("Failed to list scenarios in {}", path.display()))?;

        println!("{} {}", style("Missions file:").bold().cyan(), path.display());
        println!("{} {}", style("Menu key:").bold().cyan(), config.menu_key);
        println!();

        if names.is_empty() {
            println!("{}", style("No scenarios defined").yellow());
            return Ok(());
        }
        for (index, name) in names.iter().enumerate() {
            println!("  {:>3}  {}", style(index).dim(), name);
        }
        Ok(())
    }
}
