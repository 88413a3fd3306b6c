//! Headless front-end for the mission engine.
//!
//! Lists and inspects authored scenarios and plays one through the sandbox
//! simulation without a game attached.
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, List, Simulate};

/// Passenger transport missions, headless
#[derive(Parser)]
#[command(name = "mission-cli")]
#[command(about = "Inspect and simulate bus missions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List scenario names in document order
    List(List),

    /// Resolve one scenario and show what the engine would spawn
    Inspect(Inspect),

    /// Play a scripted run of one scenario in the sandbox
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for MISSION_DATA_DIR and MISSION_LOG_DIR)
    let _ = dotenvy::dotenv();

    let _guard = logging::setup_logging(logging::log_dir_from_env())?;

    let cli = Cli::parse();

    match cli.command {
        Command::List(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
