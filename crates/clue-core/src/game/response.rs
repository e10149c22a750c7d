use crate::model::card::Card;
use crate::model::location::Location;
use crate::model::player::PlayerId;
use crate::model::room::Room;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Wire shape shared by suggestions and accusations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBundle {
    pub from_player: PlayerId,
    pub cards: [Card; 3],
}

/// A suggestion made from the room the suggester stands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "CardBundle")]
pub struct Suggestion {
    pub from_player: PlayerId,
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl Suggestion {
    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Suspect(self.suspect),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }
}

impl From<Suggestion> for CardBundle {
    fn from(suggestion: Suggestion) -> Self {
        CardBundle {
            from_player: suggestion.from_player,
            cards: suggestion.cards(),
        }
    }
}

/// Final claim of the hidden cards. The cards are whatever the ledger left
/// unknown; they are not guaranteed to span the three categories.
pub type Accusation = CardBundle;

/// Answer to `take_turn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResponse {
    /// `destination` is `None` when every neighbour is blocked. A suggestion is
    /// bundled whenever the player ends the move in a room.
    Move {
        destination: Option<Location>,
        suggestion: Option<Suggestion>,
    },
    /// The ledger already pins down the solution; the turn ends with it.
    Accuse(Accusation),
}

impl TurnResponse {
    pub fn destination(&self) -> Option<Location> {
        match self {
            TurnResponse::Move { destination, .. } => *destination,
            TurnResponse::Accuse(_) => None,
        }
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            TurnResponse::Move { suggestion, .. } => suggestion.as_ref(),
            TurnResponse::Accuse(_) => None,
        }
    }

    pub fn accusation(&self) -> Option<&Accusation> {
        match self {
            TurnResponse::Accuse(accusation) => Some(accusation),
            TurnResponse::Move { .. } => None,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for TurnResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TurnResponse::Move {
                destination,
                suggestion,
            } => {
                let mut map = serializer.serialize_map(None)?;
                let target = destination.map(|d| d.to_string()).unwrap_or_default();
                map.serialize_entry("move", &target)?;
                if let Some(suggestion) = suggestion {
                    map.serialize_entry("suggestion", suggestion)?;
                }
                map.end()
            }
            TurnResponse::Accuse(accusation) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("accusation", accusation)?;
                map.serialize_entry("turn_complete", &true)?;
                map.end()
            }
        }
    }
}

/// Card shown in answer to someone else's suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Card(Card),
    NoMatch,
}

impl Reveal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reveal::Card(card) => card.as_str(),
            Reveal::NoMatch => "no_match",
        }
    }
}

impl Serialize for Reveal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Answer to `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResponse {
    Answer(Reveal),
    TurnComplete { accusation: Option<Accusation> },
    Silent,
}

impl UpdateResponse {
    pub fn is_turn_complete(&self) -> bool {
        matches!(self, UpdateResponse::TurnComplete { .. })
    }

    pub fn accusation(&self) -> Option<&Accusation> {
        match self {
            UpdateResponse::TurnComplete { accusation } => accusation.as_ref(),
            _ => None,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for UpdateResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UpdateResponse::Answer(reveal) => reveal.serialize(serializer),
            UpdateResponse::TurnComplete { accusation } => {
                let mut map = serializer.serialize_map(None)?;
                if let Some(accusation) = accusation {
                    map.serialize_entry("accusation", accusation)?;
                }
                map.serialize_entry("turn_complete", &true)?;
                map.end()
            }
            UpdateResponse::Silent => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CardBundle, Reveal, Suggestion, TurnResponse, UpdateResponse};
    use crate::model::card::Card;
    use crate::model::location::Location;
    use crate::model::player::PlayerId;
    use crate::model::room::Room;
    use crate::model::suspect::Suspect;
    use crate::model::weapon::Weapon;
    use serde_json::json;

    fn p04() -> PlayerId {
        PlayerId::new(4).unwrap()
    }

    #[test]
    fn move_with_suggestion_matches_wire_shape() {
        let response = TurnResponse::Move {
            destination: Some(Location::Room(Room::Hall)),
            suggestion: Some(Suggestion {
                from_player: p04(),
                suspect: Suspect::Scarlet,
                weapon: Weapon::Candlestick,
                room: Room::Hall,
            }),
        };
        assert_eq!(
            response.to_value(),
            json!({
                "move": "Hall",
                "suggestion": {"from_player": "p04", "cards": ["Scarlet", "Candlestick", "Hall"]}
            })
        );
    }

    #[test]
    fn blocked_move_is_an_empty_string() {
        let response = TurnResponse::Move {
            destination: None,
            suggestion: None,
        };
        assert_eq!(response.to_value(), json!({"move": ""}));
    }

    #[test]
    fn accusation_is_bundled_with_turn_complete() {
        let accusation = CardBundle {
            from_player: p04(),
            cards: [
                Card::Suspect(Suspect::Plum),
                Card::Weapon(Weapon::Rope),
                Card::Room(Room::Dining),
            ],
        };
        let expected = json!({
            "accusation": {"from_player": "p04", "cards": ["Plum", "Rope", "Dining"]},
            "turn_complete": true
        });
        assert_eq!(TurnResponse::Accuse(accusation).to_value(), expected);
        assert_eq!(
            UpdateResponse::TurnComplete {
                accusation: Some(accusation)
            }
            .to_value(),
            expected
        );
    }

    #[test]
    fn answers_serialize_as_plain_strings() {
        assert_eq!(
            UpdateResponse::Answer(Reveal::Card(Card::Suspect(Suspect::Mustard))).to_value(),
            json!("Mustard")
        );
        assert_eq!(UpdateResponse::Answer(Reveal::NoMatch).to_value(), json!("no_match"));
        assert_eq!(
            UpdateResponse::TurnComplete { accusation: None }.to_value(),
            json!({"turn_complete": true})
        );
        assert_eq!(UpdateResponse::Silent.to_value(), serde_json::Value::Null);
    }
}
