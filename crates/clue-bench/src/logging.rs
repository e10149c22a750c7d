use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

/// Targets that log at the configured level.
const RUN_TARGETS: [&str; 4] = [
    "clue_bench::run",
    "clue_bench::table",
    "clue_bot::accuse",
    "clue_bot::registry",
];

/// Keeps the telemetry writer alive until the run ends.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Path of the telemetry log for a run: next to the Markdown summary.
pub fn telemetry_path(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join("telemetry.jsonl")
}

/// Builds the `EnvFilter` directives for the engine and harness targets.
///
/// Everything else stays at `warn`. Movement, suggestion and ledger events are
/// debug-level and only pass when their detail switch is on.
pub fn filter_directives(logging: &LoggingConfig) -> String {
    let level = logging
        .level()
        .unwrap_or(Level::INFO)
        .as_str()
        .to_ascii_lowercase();

    let mut directives = vec!["warn".to_string()];
    directives.extend(RUN_TARGETS.iter().map(|target| format!("{target}={level}")));
    for (target, enabled) in [
        ("clue_bot::movement", logging.movement_details),
        ("clue_bot::suggest", logging.suggest_details),
        ("clue_bot::ledger", logging.ledger_details),
    ] {
        let target_level = if enabled { "debug" } else { level.as_str() };
        directives.push(format!("{target}={target_level}"));
    }
    directives.join(",")
}

/// Installs a JSON subscriber writing `telemetry.jsonl` next to the summary.
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_path = telemetry_path(outputs);
    if let Some(dir) = telemetry_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating telemetry directory at {}", dir.display()))?;
    }
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(logging))
            .context("building telemetry filter from logging config")?,
    };

    // Events carry the enclosing run span, which holds `run_id`.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
        .finish();

    // A global subscriber may already be installed by an embedding test.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            enable_structured: true,
            tracing_level: level.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn directives_cover_engine_targets_at_the_configured_level() {
        let directives = filter_directives(&logging("info"));
        assert!(directives.starts_with("warn,"));
        for target in [
            "clue_bench::run=info",
            "clue_bench::table=info",
            "clue_bot::accuse=info",
            "clue_bot::registry=info",
            "clue_bot::movement=info",
            "clue_bot::suggest=info",
            "clue_bot::ledger=info",
        ] {
            assert!(directives.contains(target), "missing {target}");
        }
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn detail_switches_raise_single_targets_to_debug() {
        let mut config = logging("warn");
        config.ledger_details = true;
        let directives = filter_directives(&config);
        assert!(directives.contains("clue_bot::ledger=debug"));
        assert!(directives.contains("clue_bot::movement=warn"));
        assert!(directives.contains("clue_bench::run=warn"));
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let directives = filter_directives(&logging("chatty"));
        assert!(directives.contains("clue_bot::accuse=info"));
    }

    #[test]
    fn telemetry_sits_next_to_the_summary() {
        let outputs = ResolvedOutputs {
            jsonl: PathBuf::from("bench/out/run/games.jsonl"),
            summary_md: PathBuf::from("bench/out/run/summary.md"),
        };
        assert_eq!(
            telemetry_path(&outputs),
            PathBuf::from("bench/out/run/telemetry.jsonl")
        );

        let bare = ResolvedOutputs {
            jsonl: PathBuf::from("games.jsonl"),
            summary_md: PathBuf::from("summary.md"),
        };
        assert_eq!(telemetry_path(&bare), PathBuf::from("./telemetry.jsonl"));
    }
}
