mod table;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clue_bot::BotParams;
use clue_core::board::Board;
use clue_core::error::ClueError;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event, info_span};

use crate::config::{GameConfig, ResolvedOutputs, SimulationConfig};
use crate::logging::telemetry_path;

pub use table::{GameOutcome, GameStatus, GameTable};

/// Plays a batch of self-play games and records one row per game.
pub struct MatchRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    board: Arc<Board>,
    params: BotParams,
    logging_enabled: bool,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub games_played: usize,
    pub wins: usize,
    pub stalls: usize,
    pub exhausted: usize,
    pub mean_turns: f64,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl MatchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.game.players > GameConfig::MAX_SEATED {
            return Err(RunnerError::SeatCount {
                found: config.game.players,
                max: GameConfig::MAX_SEATED,
            });
        }

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            params: BotParams::new(config.game.tie_break()),
            board: Arc::new(Board::standard()),
            config,
            outputs,
        })
    }

    /// Execute every game, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        let span = info_span!(
            target: "clue_bench::run",
            "self_play",
            run_id = %self.config.run_id
        );
        let _run = span.enter();

        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.game.seed.unwrap_or(0));
        let mut tally = Tally::default();

        for game_index in 0..self.config.game.games {
            let deal_seed = rng.next_u64();
            let table = GameTable::deal(
                Arc::clone(&self.board),
                self.params,
                self.config.game.players,
                deal_seed,
            )?;
            let outcome = table.play(self.config.game.max_turns)?;

            if self.logging_enabled && tracing::enabled!(target: "clue_bench::run", Level::INFO) {
                event!(
                    target: "clue_bench::run",
                    Level::INFO,
                    game_index,
                    deal_seed,
                    status = outcome.status.as_str(),
                    turns = outcome.turns,
                    winner = ?outcome.winner.map(|(id, _)| id.to_string()),
                    "game finished"
                );
            }

            write_game_row(&mut writer, &self.config, game_index, deal_seed, &outcome)?;
            tally.record(&outcome);
        }

        writer.flush()?;
        tally.write_markdown(&self.config, &self.outputs.summary_md)?;

        let telemetry_path = self.logging_enabled.then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            games_played: tally.games,
            wins: tally.wins,
            stalls: tally.stalls,
            exhausted: tally.exhausted,
            mean_turns: tally.mean_turns(),
            rows_written: tally.games,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    deal_seed: u64,
    players: usize,
    solution: [&'static str; 3],
    status: &'static str,
    winner: Option<String>,
    winner_suspect: Option<&'static str>,
    turns: usize,
    suggestions: usize,
    blocked_moves: usize,
    wrong_accusations: usize,
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &SimulationConfig,
    game_index: usize,
    deal_seed: u64,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{game_index:05}"),
        game_index,
        deal_seed,
        players: config.game.players,
        solution: outcome.solution.cards().map(|card| card.as_str()),
        status: outcome.status.as_str(),
        winner: outcome.winner.map(|(id, _)| id.to_string()),
        winner_suspect: outcome.winner.map(|(_, suspect)| suspect.as_str()),
        turns: outcome.turns,
        suggestions: outcome.suggestions,
        blocked_moves: outcome.blocked_moves,
        wrong_accusations: outcome.wrong_accusations,
    };
    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Debug, Default)]
struct Tally {
    games: usize,
    wins: usize,
    stalls: usize,
    exhausted: usize,
    total_turns: usize,
    suggestions: usize,
    wrong_accusations: usize,
}

impl Tally {
    fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.total_turns += outcome.turns;
        self.suggestions += outcome.suggestions;
        self.wrong_accusations += outcome.wrong_accusations;
        match outcome.status {
            GameStatus::Solved => self.wins += 1,
            GameStatus::Stalled => self.stalls += 1,
            GameStatus::Exhausted => self.exhausted += 1,
        }
    }

    fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    fn write_markdown(&self, config: &SimulationConfig, path: &Path) -> Result<(), RunnerError> {
        let mut rows = String::new();
        rows.push_str("# Self-play Summary\n\n");
        rows.push_str(&format!(
            "Run `{}`: {} players, tie break `{}`, turn limit {}\n\n",
            config.run_id, config.game.players, config.game.tie_break, config.game.max_turns
        ));
        rows.push_str("| Games | Solved | Stalled | Exhausted | Mean turns | Suggestions | Wrong accusations |\n");
        rows.push_str("|-------|--------|---------|-----------|------------|-------------|-------------------|\n");
        rows.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} | {} | {} |\n",
            self.games,
            self.wins,
            self.stalls,
            self.exhausted,
            self.mean_turns(),
            self.suggestions,
            self.wrong_accusations
        ));
        fs::write(path, rows)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("player rejected the game state: {0}")]
    Player(#[from] ClueError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration seats {found} players but at most {max} are supported")]
    SeatCount { found: usize, max: usize },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
