use clue_bot::TieBreak;
use clue_core::model::player::PlayerId;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_TURNS: usize = 400;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root self-play configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub run_id: String,
    pub game: GameConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.game.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// Table and game-count settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub players: usize,
    pub games: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    #[serde(default = "default_tie_break")]
    pub tie_break: String,
}

impl GameConfig {
    /// Upper bound on seated players; one registry seats at most this many.
    pub const MAX_SEATED: usize = clue_bot::PlayerRegistry::DEFAULT_CAPACITY;

    fn validate(&self) -> Result<(), ValidationError> {
        if !(PlayerId::MIN_PLAYERS..=Self::MAX_SEATED).contains(&self.players) {
            return Err(ValidationError::InvalidField {
                field: "game.players".to_string(),
                message: format!(
                    "players must be between {} and {}",
                    PlayerId::MIN_PLAYERS,
                    Self::MAX_SEATED
                ),
            });
        }

        if self.games == 0 {
            return Err(ValidationError::InvalidField {
                field: "game.games".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.max_turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "game.max_turns".to_string(),
                message: "max_turns must be at least 1".to_string(),
            });
        }

        if TieBreak::parse(&self.tie_break).is_none() {
            return Err(ValidationError::InvalidField {
                field: "game.tie_break".to_string(),
                message: format!(
                    "unknown tie break '{}'; use ordered or seeded:<u64>",
                    self.tie_break
                ),
            });
        }

        Ok(())
    }

    pub fn tie_break(&self) -> TieBreak {
        TieBreak::parse(&self.tie_break).unwrap_or_default()
    }
}

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

fn default_tie_break() -> String {
    "ordered".to_string()
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Debug events for every move choice and rollback.
    #[serde(default)]
    pub movement_details: bool,
    /// Debug events for every suggestion drawn.
    #[serde(default)]
    pub suggest_details: bool,
    /// Debug events with the ledger summary after each answer.
    #[serde(default)]
    pub ledger_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            movement_details: false,
            suggest_details: false,
            ledger_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "selfplay_smoke"
game:
  players: 4
  games: 8
  seed: 123
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
logging:
  enable_structured: true
  tracing_level: "debug"
  ledger_details: true
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimulationConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.game.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(cfg.game.tie_break(), TieBreak::Ordered);
        assert!(cfg.logging.enable_structured);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert!(cfg.logging.ledger_details);
        assert!(!cfg.logging.movement_details);

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/selfplay_smoke/games.jsonl")
        );
    }

    #[test]
    fn rejects_player_count_outside_the_table() {
        for players in ["2", "6"] {
            let yaml = BASIC_YAML.replace("players: 4", &format!("players: {players}"));
            let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
            let err = cfg.validate().expect_err("player count should fail");
            assert!(matches!(
                err,
                ValidationError::InvalidField { field, .. } if field == "game.players"
            ));
        }
    }

    #[test]
    fn rejects_unknown_tie_break() {
        let yaml = BASIC_YAML.replace("seed: 123", "seed: 123\n  tie_break: \"coin\"");
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("tie break should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "game.tie_break"
        ));

        let seeded = BASIC_YAML.replace("seed: 123", "seed: 123\n  tie_break: \"seeded:9\"");
        let mut cfg: SimulationConfig = serde_yaml::from_str(&seeded).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.game.tie_break(), TieBreak::Seeded(9));
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("selfplay_smoke", "self play smoke");
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("invalid run id");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "run_id"
        ));
    }

    #[test]
    fn outputs_resolve_template_multiple_occurrences() {
        let yaml = BASIC_YAML.replace(
            "bench/out/{run_id}/summary.md",
            "bench/out/{run_id}/{run_id}.md",
        );
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(
            cfg.resolved_outputs().summary_md,
            PathBuf::from("bench/out/selfplay_smoke/selfplay_smoke.md")
        );
    }
}
