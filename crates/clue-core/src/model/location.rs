use crate::error::ClueError;
use crate::model::room::Room;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the twelve hallways, numbered 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hallway(u8);

impl Hallway {
    pub const COUNT: usize = 12;

    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= Self::COUNT {
            Some(Hallway(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Hallway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hallway_{:02}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Location {
    Room(Room),
    Hallway(Hallway),
}

impl Location {
    pub const COUNT: usize = Room::ALL.len() + Hallway::COUNT;

    /// Builds a hallway location in const context; `number` must be 1..=12.
    pub(crate) const fn hallway(number: u8) -> Location {
        match Hallway::new(number) {
            Some(hallway) => Location::Hallway(hallway),
            None => panic!("hallway numbers run from 1 to 12"),
        }
    }

    pub fn all() -> impl Iterator<Item = Location> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }

    /// Dense index: rooms first, then hallways in number order.
    pub const fn index(self) -> usize {
        match self {
            Location::Room(room) => room.index(),
            Location::Hallway(hallway) => Room::ALL.len() + hallway.0 as usize - 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Room::ALL.len() {
            match Room::from_index(index) {
                Some(room) => Some(Location::Room(room)),
                None => None,
            }
        } else if index < Self::COUNT {
            Some(Location::Hallway(Hallway((index - Room::ALL.len() + 1) as u8)))
        } else {
            None
        }
    }

    pub const fn room(self) -> Option<Room> {
        match self {
            Location::Room(room) => Some(room),
            Location::Hallway(_) => None,
        }
    }

    pub const fn is_room(self) -> bool {
        matches!(self, Location::Room(_))
    }

    pub fn from_name(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Some(room) = Room::from_name(trimmed) {
            return Some(Location::Room(room));
        }
        let lowered = trimmed.to_ascii_lowercase();
        let digits = lowered.strip_prefix("hallway_")?;
        digits
            .parse::<u8>()
            .ok()
            .and_then(Hallway::new)
            .map(Location::Hallway)
    }

    pub fn parse(value: &str) -> Result<Self, ClueError> {
        Self::from_name(value).ok_or_else(|| ClueError::invalid_location(value))
    }
}

impl From<Room> for Location {
    fn from(room: Room) -> Self {
        Location::Room(room)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Room(room) => fmt::Display::fmt(room, f),
            Location::Hallway(hallway) => fmt::Display::fmt(hallway, f),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = ClueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Location::parse(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Hallway, Location};
    use crate::model::room::Room;

    #[test]
    fn hallway_names_are_zero_padded() {
        assert_eq!(Location::hallway(1).to_string(), "Hallway_01");
        assert_eq!(Location::hallway(12).to_string(), "Hallway_12");
        assert_eq!(Hallway::new(0), None);
        assert_eq!(Hallway::new(13), None);
    }

    #[test]
    fn parse_accepts_rooms_and_hallways() {
        assert_eq!(Location::parse("Kitchen"), Ok(Location::Room(Room::Kitchen)));
        assert_eq!(Location::parse("Hallway_07"), Ok(Location::hallway(7)));
        assert_eq!(Location::parse("hallway_10"), Ok(Location::hallway(10)));
        assert!(Location::parse("Hallway_13").is_err());
        assert!(Location::parse("Attic").is_err());
    }

    #[test]
    fn index_roundtrip_covers_every_location() {
        let all: Vec<Location> = Location::all().collect();
        assert_eq!(all.len(), 21);
        for (i, location) in all.iter().enumerate() {
            assert_eq!(location.index(), i);
        }
        assert_eq!(Location::from_index(21), None);
    }
}
