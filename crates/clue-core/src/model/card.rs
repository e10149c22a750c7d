use crate::error::ClueError;
use crate::model::room::Room;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Suspect,
    Weapon,
    Room,
}

impl Category {
    pub const fn index(self) -> usize {
        match self {
            Category::Suspect => 0,
            Category::Weapon => 1,
            Category::Room => 2,
        }
    }
}

/// One of the 21 Clue-Less cards.
///
/// Ordering (and `to_id`) runs suspects, then weapons, then rooms; anything
/// that needs a canonical card order relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Card {
    Suspect(Suspect),
    Weapon(Weapon),
    Room(Room),
}

impl Card {
    pub const COUNT: usize = 21;

    pub const ALL: [Card; Card::COUNT] = [
        Card::Suspect(Suspect::Scarlet),
        Card::Suspect(Suspect::Mustard),
        Card::Suspect(Suspect::White),
        Card::Suspect(Suspect::Green),
        Card::Suspect(Suspect::Peacock),
        Card::Suspect(Suspect::Plum),
        Card::Weapon(Weapon::Knife),
        Card::Weapon(Weapon::Wrench),
        Card::Weapon(Weapon::Revolver),
        Card::Weapon(Weapon::Pipe),
        Card::Weapon(Weapon::Rope),
        Card::Weapon(Weapon::Candlestick),
        Card::Room(Room::Study),
        Card::Room(Room::Hall),
        Card::Room(Room::Lounge),
        Card::Room(Room::Library),
        Card::Room(Room::Billiard),
        Card::Room(Room::Dining),
        Card::Room(Room::Conservatory),
        Card::Room(Room::Ballroom),
        Card::Room(Room::Kitchen),
    ];

    pub const fn category(self) -> Category {
        match self {
            Card::Suspect(_) => Category::Suspect,
            Card::Weapon(_) => Category::Weapon,
            Card::Room(_) => Category::Room,
        }
    }

    pub const fn to_id(self) -> u8 {
        match self {
            Card::Suspect(suspect) => suspect as u8,
            Card::Weapon(weapon) => 6 + weapon as u8,
            Card::Room(room) => 12 + room as u8,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Card::COUNT {
            Some(Card::ALL[id as usize])
        } else {
            None
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        Suspect::from_name(value)
            .map(Card::Suspect)
            .or_else(|| Weapon::from_name(value).map(Card::Weapon))
            .or_else(|| Room::from_name(value).map(Card::Room))
    }

    /// Parses a card name, reporting the raw name when it is not one of the 21.
    pub fn parse(value: &str) -> Result<Self, ClueError> {
        Self::from_name(value).ok_or_else(|| ClueError::invalid_card(value))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Card::Suspect(suspect) => suspect.as_str(),
            Card::Weapon(weapon) => weapon.as_str(),
            Card::Room(room) => room.as_str(),
        }
    }

    pub const fn suspect(self) -> Option<Suspect> {
        match self {
            Card::Suspect(suspect) => Some(suspect),
            _ => None,
        }
    }

    pub const fn weapon(self) -> Option<Weapon> {
        match self {
            Card::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }

    pub const fn room(self) -> Option<Room> {
        match self {
            Card::Room(room) => Some(room),
            _ => None,
        }
    }

    pub fn of_category(category: Category) -> impl Iterator<Item = Card> {
        Card::ALL
            .into_iter()
            .filter(move |card| card.category() == category)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Card {
    type Error = ClueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Card::parse(&value)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Category};
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;

    #[test]
    fn ids_follow_canonical_order() {
        for (i, card) in Card::ALL.iter().enumerate() {
            assert_eq!(card.to_id() as usize, i);
            assert_eq!(Card::from_id(i as u8), Some(*card));
        }
        assert_eq!(Card::from_id(21), None);
        let mut sorted = Card::ALL;
        sorted.sort();
        assert_eq!(sorted, Card::ALL);
    }

    #[test]
    fn category_sizes() {
        assert_eq!(Card::of_category(Category::Suspect).count(), 6);
        assert_eq!(Card::of_category(Category::Weapon).count(), 6);
        assert_eq!(Card::of_category(Category::Room).count(), 9);
    }

    #[test]
    fn parse_reports_unknown_name() {
        assert_eq!(Card::parse("green"), Ok(Card::Suspect(Suspect::Green)));
        let err = Card::parse("Blue").unwrap_err();
        assert_eq!(err.to_string(), "the card Blue is not valid");
    }

    #[test]
    fn serializes_as_plain_name() {
        let json = serde_json::to_string(&Card::Room(Room::Study)).unwrap();
        assert_eq!(json, "\"Study\"");
        let card: Card = serde_json::from_str("\"rope\"").unwrap();
        assert_eq!(card.as_str(), "Rope");
        assert!(serde_json::from_str::<Card>("\"Spoon\"").is_err());
    }
}
