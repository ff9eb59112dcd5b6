use std::path::PathBuf;

use clap::Parser;

use clue_replay::config::{ResolvedOutputs, ScenarioConfig};
use clue_replay::logging::init_logging;
use clue_replay::replay::ReplayRunner;

/// Replays a recorded Clue transcript through the belief engine.
#[derive(Debug, Parser)]
#[command(
    name = "clue-replay",
    author,
    version,
    about = "Deterministic transcript replay for the Clue belief engine"
)]
struct Cli {
    /// Path to the YAML scenario file.
    #[arg(short, long, value_name = "FILE", default_value = "scenarios/classic.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the RNG seed used for the engine's random picks.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the scenario (no replay is run).
    #[arg(long)]
    validate_only: bool,

    /// Record third-party unanswered questions regardless of config.
    #[arg(long)]
    observe_nobody: bool,

    /// Log every question decision regardless of config.
    #[arg(long)]
    decision_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ScenarioConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if cli.observe_nobody {
        config.features.observe_nobody = true;
    }

    if cli.decision_details {
        config.features.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let steps = config.script.len();
    let players = config.game.players;

    println!(
        "Loaded scenario '{run_id}' with {players} players and {steps} scripted event{}",
        if steps == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = ReplayRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} events -> {} rows at {}",
        summary.steps,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    match summary.solution.as_ref() {
        Some([figure, weapon, room]) => {
            println!("Solution: {figure} with the {weapon} in the {room}");
        }
        None => {
            let knowledge = &summary.knowledge;
            println!(
                "Unsolved: {} figures, {} weapons, {} rooms remain",
                knowledge.unknown_figures.len(),
                knowledge.unknown_weapons.len(),
                knowledge.unknown_rooms.len()
            );
        }
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
