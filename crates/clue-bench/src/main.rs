use std::path::PathBuf;

use clap::Parser;
use clue_core::AppInfo;

use clue_bench::config::{ResolvedOutputs, SimulationConfig};
use clue_bench::logging::init_logging;
use clue_bench::simulation::MatchRunner;

/// Self-play harness for the autonomous Clue-Less player.
#[derive(Debug, Parser)]
#[command(
    name = "clue-bench",
    author,
    version = AppInfo::version(),
    about = "Deterministic Clue-Less self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the tie break (`ordered` or `seeded:<u64>`).
    #[arg(long, value_name = "MODE")]
    tie_break: Option<String>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.game.games = games;
    }

    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }

    if let Some(tie_break) = cli.tie_break {
        config.game.tie_break = tie_break;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let players = config.game.players;
    let games = config.game.games;

    println!(
        "{} {}: loaded configuration '{run_id}' with {players} players ({games} game{})",
        AppInfo::name(),
        AppInfo::version(),
        if games == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = MatchRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: self-play skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Self-play complete for '{run_id}': {} games, {} solved, {} stalled, {} exhausted, {:.1} turns on average",
        summary.games_played, summary.wins, summary.stalls, summary.exhausted, summary.mean_turns
    );
    println!(
        "{} rows at {}",
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
