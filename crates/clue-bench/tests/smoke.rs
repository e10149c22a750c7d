use std::fs;

use clue_bench::config::SimulationConfig;
use clue_bench::logging::init_logging;
use clue_bench::simulation::MatchRunner;
use tempfile::tempdir;

fn load_config(
    output_dir: &std::path::Path,
    tie_break: &str,
    structured: bool,
) -> SimulationConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
game:
  players: 4
  games: 3
  seed: 4242
  max_turns: 200
  tie_break: "{tie_break}"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: {structured}
  movement_details: true
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_once(tie_break: &str) -> (String, String) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), tie_break, false);
    let outputs = config.resolved_outputs();

    let runner = MatchRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("self-play completes");

    assert_eq!(summary.games_played, 3);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(
        summary.wins + summary.stalls + summary.exhausted,
        summary.games_played
    );
    assert!(summary.telemetry_path.is_none());

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let markdown = fs::read_to_string(&summary.summary_path).expect("summary markdown readable");
    (jsonl, markdown)
}

#[test]
fn self_play_smoke_test_writes_one_row_per_game() {
    let (jsonl, markdown) = run_once("ordered");

    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 3);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["game_index"], index);
        assert_eq!(row["solution"].as_array().map(Vec::len), Some(3));
        let status = row["status"].as_str().expect("status string");
        assert!(["solved", "stalled", "exhausted"].contains(&status));
        assert_eq!(row["winner"].is_null(), status != "solved");
    }

    assert!(markdown.starts_with("# Self-play Summary"));
    assert!(markdown.contains("| Games | Solved |"));
}

#[test]
fn same_seed_replays_identically() {
    let (first, _) = run_once("seeded:7");
    let (second, _) = run_once("seeded:7");
    assert_eq!(first, second);
}

#[test]
fn structured_logging_writes_telemetry_next_to_the_summary() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "ordered", true);
    let outputs = config.resolved_outputs();

    let guard = init_logging(&config.logging, &outputs)
        .expect("logging initialises")
        .expect("structured logging enabled");
    let expected = dir.path().join("telemetry.jsonl");
    assert_eq!(guard.telemetry_path, expected);
    assert!(expected.exists());

    let runner = MatchRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("self-play completes");
    assert_eq!(summary.telemetry_path.as_deref(), Some(expected.as_path()));
    drop(guard);

    let telemetry = fs::read_to_string(&expected).expect("telemetry readable");
    for line in telemetry.lines() {
        let _: serde_json::Value = serde_json::from_str(line).expect("telemetry line is JSON");
    }
}
