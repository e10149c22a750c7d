use crate::error::ClueError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Player identifier as used on the wire (`p01` .. `p06`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const MIN_PLAYERS: usize = 3;
    pub const MAX_PLAYERS: usize = 6;

    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= Self::MAX_PLAYERS {
            Some(PlayerId(number))
        } else {
            None
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::MAX_PLAYERS {
            Some(PlayerId(index as u8 + 1))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Ids `p01..pNN` for a game of `count` players.
    pub fn roster(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count.min(Self::MAX_PLAYERS)).filter_map(Self::from_index)
    }

    pub fn parse(value: &str) -> Result<Self, ClueError> {
        let trimmed = value.trim();
        trimmed
            .strip_prefix('p')
            .or_else(|| trimmed.strip_prefix('P'))
            .and_then(|digits| digits.parse::<u8>().ok())
            .and_then(PlayerId::new)
            .ok_or_else(|| ClueError::InvalidPlayer {
                name: value.to_string(),
            })
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{:02}", self.0)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ClueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PlayerId::parse(&value)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(PlayerId::new(4).unwrap().to_string(), "p04");
        assert_eq!(PlayerId::parse("p04"), Ok(PlayerId::new(4).unwrap()));
        assert!(PlayerId::parse("p07").is_err());
        assert!(PlayerId::parse("player").is_err());
    }

    #[test]
    fn roster_lists_every_seat() {
        let ids: Vec<String> = PlayerId::roster(4).map(|id| id.to_string()).collect();
        assert_eq!(ids, ["p01", "p02", "p03", "p04"]);
    }
}
