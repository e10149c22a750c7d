use crate::model::player::PlayerId;
use thiserror::Error;

pub type ClueResult<T> = Result<T, ClueError>;

/// Contract violations surfaced by the player core.
///
/// None of these are retried; the orchestrator is expected to abandon the
/// setup step that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClueError {
    #[error("no more than {max} computer players allowed")]
    Capacity { max: usize },
    #[error("the number of cards dealt, must be between 3 and 6 (got {count})")]
    CardCount { count: usize },
    #[error("the card {name} is not valid")]
    InvalidCard { name: String },
    #[error("the location {name} is not on the board")]
    InvalidLocation { name: String },
    #[error("the player id {name} is not valid")]
    InvalidPlayer { name: String },
    #[error("player {player} is not tracked in this game")]
    UnknownPlayer { player: PlayerId },
    #[error("a game needs between 3 and 6 players (got {count})")]
    PlayerCount { count: usize },
    #[error("no suspect is available to assign")]
    NoSuspectAvailable,
    #[error("malformed game state: {reason}")]
    MalformedEvent { reason: String },
}

impl ClueError {
    pub fn invalid_card(name: impl Into<String>) -> Self {
        Self::InvalidCard { name: name.into() }
    }

    pub fn invalid_location(name: impl Into<String>) -> Self {
        Self::InvalidLocation { name: name.into() }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            reason: reason.into(),
        }
    }
}
