//! Resolve and display one scenario

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use mission_core::{ResolvedScenario, ScenarioSource};

use super::ContentArgs;

/// Resolve one scenario and show what the engine would spawn
#[derive(Parser)]
pub struct Inspect {
    /// Exact scenario name
    #[arg(value_name = "NAME")]
    name: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let (factory, config) = self.content.load();
        let store = factory.scenario_store(&config);
        let resolved = store
            .resolve(&self.name)
            .with_context(|| format!("Failed to resolve scenario '{}'", self.name))?;

        match self.format {
            OutputFormat::Summary => print_summary(&resolved),
            OutputFormat::Json => print_json(&resolved)?,
        }
        Ok(())
    }
}

fn print_summary(resolved: &ResolvedScenario) {
    let record = &resolved.record;
    println!("{}", style(format!("=== {} ===", record.name)).bold().green());
    println!();

    if !record.description.is_empty() {
        println!("{}", style("Description:").bold().yellow());
        for line in &record.description {
            println!("  {}", line);
        }
        println!();
    }

    println!("{}", style("Passengers:").bold().yellow());
    for (index, passenger) in record.passengers.iter().enumerate() {
        println!(
            "  [{}] model {} at {} heading {:.1}",
            index, passenger.model, passenger.position, passenger.heading
        );
    }
    println!();

    println!("{}", style("Vehicle:").bold().yellow());
    println!(
        "  model {} at {} heading {:.1}",
        record.vehicle.model, record.vehicle.position, record.vehicle.heading
    );
    println!();

    println!("{} {}", style("Destination:").bold().yellow(), record.destination);
    println!("{} {}", style("Reward:").bold().yellow(), record.reward);

    if !resolved.diagnostics.is_empty() {
        println!();
        println!("{}", style("Diagnostics:").bold().red());
        for diagnostic in &resolved.diagnostics {
            println!("  {}", diagnostic);
        }
    }
}

fn print_json(resolved: &ResolvedScenario) -> Result<()> {
    let value = serde_json::json!({
        "record": resolved.record,
        "diagnostics": resolved.diagnostics,
    });
    let json =
        serde_json::to_string_pretty(&value).context("Failed to serialize scenario to JSON")?;
    println!("{}", json);
    Ok(())
}
