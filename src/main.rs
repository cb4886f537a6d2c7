//! Skirmish runner
//!
//! Runs a scenario (a TOML file or one of the built-in presets) to the end
//! and prints the history, or the full result as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use skirmish::core::error::{Result, SimError};
use skirmish::scenario::{Preset, Scenario};
use skirmish::simulation::SimulationOutput;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Turn-based skirmish between elves, orcs and wildlife")]
struct Args {
    /// Scenario file (TOML); overrides --preset
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario: battle_arena, wild_lands or effects_demo (or 1-3)
    #[arg(long, default_value = "battle_arena")]
    preset: String,

    /// Maximum turns, defaults to the scenario's own limit
    #[arg(long)]
    turns: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Move script overriding the scenario's
    #[arg(long)]
    script: Option<String>,

    /// Print the map after every turn
    #[arg(long)]
    map: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Also write the JSON result to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skirmish=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Preset::from_name(&args.preset)
            .ok_or_else(|| SimError::Scenario(format!("unknown preset '{}'", args.preset)))?
            .scenario(),
    };
    if let Some(seed) = args.seed {
        scenario.simulation.seed = Some(seed);
    }
    if let Some(script) = &args.script {
        scenario.script = Some(script.clone());
    }
    let max_turns = args.turns.unwrap_or(scenario.turns);

    tracing::info!(scenario = %scenario.name, max_turns, "starting");
    let mut sim = scenario.build()?;

    let started = Instant::now();
    let mut printed = 0;
    for _ in 0..max_turns {
        if sim.is_finished() {
            break;
        }
        let summary = sim.next_turn()?;
        if !args.json {
            for entry in &sim.history().entries()[printed..] {
                println!("{}", entry);
            }
            printed = sim.history().len();
            if args.map {
                if let Some(frame) = sim.replay().last() {
                    println!("{}", frame);
                }
            }
        }
        for fault in &summary.faults {
            tracing::warn!(turn = summary.turn, %fault, "fault");
        }
    }

    let output = SimulationOutput::new(&scenario.name, &sim, started.elapsed());
    if args.json {
        println!("{}", output.to_json());
    } else {
        println!();
        println!("{}", output.summary());
    }
    if let Some(path) = &args.output {
        std::fs::write(path, output.to_json())?;
        tracing::info!(path = %path.display(), "result written");
    }
    Ok(())
}
