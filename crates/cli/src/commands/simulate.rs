//! Scripted headless run of one scenario

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use mission_core::{Control, EntityWorld, PlayerState, PrepareOutcome, TickOutcome};
use mission_runtime::{MissionHost, SandboxWorld};

use super::ContentArgs;

/// Play a scripted run of one scenario in the sandbox
///
/// The script drives the bus next to the first passenger and honks, then
/// drives to the destination and honks again. Waits are recorded, not slept.
#[derive(Parser)]
pub struct Simulate {
    /// Exact scenario name
    #[arg(value_name = "NAME")]
    name: String,

    #[command(flatten)]
    content: ContentArgs,

    /// Starting balance of the player
    #[arg(short, long, default_value_t = 1000)]
    money: i64,

    /// Scatter seed (overrides the configured seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// How the run ends after the pickup
    #[arg(short, long, value_enum, default_value = "deliver")]
    ending: Ending,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Ending {
    /// Drive to the destination and honk
    Deliver,
    /// Cancel from the menu
    Cancel,
    /// A passenger dies on the way
    Crash,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let (factory, mut config) = self.content.load();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        let mut host = MissionHost::from_config(&factory, &config);
        let mut world = SandboxWorld::new(self.money);
        host.announce(&mut world);

        let index = host
            .catalog()
            .iter()
            .position(|name| *name == self.name)
            .with_context(|| format!("Scenario '{}' not found", self.name))?;
        host.select(index)?;

        let prepared = host.start(&mut world)?;
        report_prepare(&prepared);
        if let PrepareOutcome::Unresolved(err) = prepared {
            anyhow::bail!("{}", err);
        }

        let engine = host.engine();
        let bus = engine.vehicle();
        let first = engine.passengers().and_then(|group| group.first());
        let destination = engine.scenario().map(|scenario| scenario.destination);
        let approach = engine.config().pickup_distance / 2.0;

        if let Some(bus) = bus {
            world.enter_as_driver(bus);
            if let Some(first) = first {
                let stop = world.position(first).offset(approach, 0.0);
                world.drive_to(bus, stop);
            }
        }
        world.press(Control::VehicleHorn);
        let mut outcome = host.on_tick(&mut world);
        report_tick("pickup", outcome);

        if outcome.is_active() {
            match self.ending {
                Ending::Deliver => {
                    if let (Some(bus), Some(destination)) = (bus, destination) {
                        world.drive_to(bus, destination);
                    }
                    outcome = host.on_tick(&mut world);
                    report_tick("delivery", outcome);
                }
                Ending::Cancel => {
                    host.cancel(&mut world)?;
                    outcome = TickOutcome::Idle;
                    println!("{} cancelled", style("cancel:").bold());
                }
                Ending::Crash => {
                    if let Some(first) = first {
                        world.kill(first);
                    }
                    outcome = host.on_tick(&mut world);
                    report_tick("crash", outcome);
                }
            }
        }

        println!();
        println!("{}", style("=== Run Summary ===").bold().green());
        println!("  Phase: {}", host.engine().phase());
        println!("  Last tick: {}", outcome);
        println!(
            "  Money: {} -> {}",
            self.money,
            style(world.money()).bold()
        );
        println!("  Waited: {:?}", world.total_wait());
        println!();
        println!("{}", style("Subtitles:").bold().yellow());
        for subtitle in world.subtitles() {
            println!("  {}", subtitle.text);
        }
        Ok(())
    }
}

fn report_prepare(outcome: &PrepareOutcome) {
    match outcome {
        PrepareOutcome::Ready => println!("{} ready", style("prepare:").bold()),
        PrepareOutcome::Partial(steps) => {
            let codes: Vec<_> = steps.iter().map(|step| step.error_code()).collect();
            println!(
                "{} partial ({})",
                style("prepare:").bold(),
                style(codes.join(", ")).yellow()
            );
        }
        PrepareOutcome::Unresolved(err) => {
            println!("{} {}", style("prepare:").bold(), style(err).red())
        }
    }
}

fn report_tick(step: &str, outcome: TickOutcome) {
    let label = match outcome {
        TickOutcome::Completed => style(outcome).green(),
        TickOutcome::Failed => style(outcome).red(),
        _ => style(outcome).cyan(),
    };
    println!("{} {}", style(format!("{step}:")).bold(), label);
}
