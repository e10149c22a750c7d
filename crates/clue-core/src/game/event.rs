use crate::error::{ClueError, ClueResult};
use crate::model::card::Card;
use crate::model::location::Location;
use crate::model::player::PlayerId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Current board position of every tracked player.
pub type Positions = BTreeMap<PlayerId, Location>;

/// Request for the receiving player to take its turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnRequest {
    pub positions: Positions,
}

impl TurnRequest {
    pub fn new(positions: Positions) -> Self {
        Self { positions }
    }

    /// Decodes `{"positions": {"p01": "Kitchen", ...}}`.
    pub fn from_value(value: &Value) -> ClueResult<Self> {
        let raw = RawEvent::deserialize(value).map_err(|err| ClueError::malformed(err.to_string()))?;
        let positions = raw
            .positions
            .ok_or_else(|| ClueError::malformed("turn request carries no positions"))?;
        Ok(Self { positions })
    }

    pub fn from_json(json: &str) -> ClueResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| ClueError::malformed(err.to_string()))?;
        Self::from_value(&value)
    }
}

/// Game-state update relayed to a player, decoded once from the loosely
/// keyed mapping the orchestrator sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Where every player currently stands.
    PositionBroadcast { positions: Positions },
    /// Someone wants to know whether the receiver holds one of `cards`.
    /// `to_player` names the intended responder when the caller knows it.
    SuggestionRequest {
        from_player: Option<PlayerId>,
        to_player: Option<PlayerId>,
        cards: [Card; 3],
    },
    /// Answer to the receiver's own suggestion. `card` is `None` when nobody
    /// matched; `move_made` acknowledges the move bundled with the suggestion.
    SuggestionOutcomeDirected {
        from_player: Option<PlayerId>,
        card: Option<Card>,
        move_made: Option<bool>,
    },
    /// Public notice that `from_player` did (or did not) match a suggestion.
    SuggestionOutcomeUndirected {
        from_player: PlayerId,
        has_card: bool,
        cards: [Card; 3],
    },
    /// Result of the move proposed by the receiver.
    MoveAck { success: bool },
}

impl GameEvent {
    pub fn from_value(value: &Value) -> ClueResult<Self> {
        let raw = RawEvent::deserialize(value).map_err(|err| ClueError::malformed(err.to_string()))?;
        raw.classify()
    }

    pub fn from_json(json: &str) -> ClueResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|err| ClueError::malformed(err.to_string()))?;
        Self::from_value(&value)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::PositionBroadcast { .. } => "position_broadcast",
            GameEvent::SuggestionRequest { .. } => "suggestion_request",
            GameEvent::SuggestionOutcomeDirected { .. } => "suggestion_outcome_directed",
            GameEvent::SuggestionOutcomeUndirected { .. } => "suggestion_outcome_undirected",
            GameEvent::MoveAck { .. } => "move_ack",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    positions: Option<Positions>,
    #[serde(default)]
    suggestion: Option<RawSuggestion>,
    #[serde(default)]
    answer: Option<RawAnswer>,
    #[serde(default)]
    cards: Option<Vec<Card>>,
    #[serde(default, alias = "move_completed")]
    move_made: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    from_player: Option<PlayerId>,
    #[serde(default)]
    to_player: Option<PlayerId>,
    cards: Vec<Card>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    #[serde(default)]
    from_player: Option<PlayerId>,
    #[serde(default)]
    card: Option<String>,
    #[serde(default)]
    has_card: Option<bool>,
}

const NO_MATCH: &str = "no_match";

impl RawEvent {
    fn classify(self) -> ClueResult<GameEvent> {
        if let Some(answer) = self.answer {
            return match answer.has_card {
                Some(has_card) => {
                    let from_player = answer
                        .from_player
                        .ok_or_else(|| ClueError::malformed("answer carries no from_player"))?;
                    let cards = self
                        .cards
                        .or_else(|| self.suggestion.map(|suggestion| suggestion.cards))
                        .ok_or_else(|| ClueError::malformed("answer carries no suggested cards"))?;
                    Ok(GameEvent::SuggestionOutcomeUndirected {
                        from_player,
                        has_card,
                        cards: suggested_triple(cards)?,
                    })
                }
                None => Ok(GameEvent::SuggestionOutcomeDirected {
                    from_player: answer.from_player,
                    card: revealed_card(answer.card.as_deref())?,
                    move_made: self.move_made,
                }),
            };
        }

        if let Some(suggestion) = self.suggestion {
            return Ok(GameEvent::SuggestionRequest {
                from_player: suggestion.from_player,
                to_player: suggestion.to_player,
                cards: suggested_triple(suggestion.cards)?,
            });
        }

        if let Some(positions) = self.positions {
            return Ok(GameEvent::PositionBroadcast { positions });
        }

        if let Some(success) = self.move_made {
            return Ok(GameEvent::MoveAck { success });
        }

        Err(ClueError::malformed("no recognised game state keys"))
    }
}

fn suggested_triple(cards: Vec<Card>) -> ClueResult<[Card; 3]> {
    let count = cards.len();
    let triple: [Card; 3] = cards
        .try_into()
        .map_err(|_| ClueError::malformed(format!("a suggestion names 3 cards, got {count}")))?;
    if triple[0] == triple[1] || triple[0] == triple[2] || triple[1] == triple[2] {
        return Err(ClueError::malformed("a suggestion repeats a card"));
    }
    Ok(triple)
}

fn revealed_card(raw: Option<&str>) -> ClueResult<Option<Card>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) if name.eq_ignore_ascii_case(NO_MATCH) => Ok(None),
        Some(name) => Card::parse(name).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::{GameEvent, TurnRequest};
    use crate::error::ClueError;
    use crate::model::card::Card;
    use crate::model::location::Location;
    use crate::model::player::PlayerId;
    use serde_json::json;

    fn id(number: u8) -> PlayerId {
        PlayerId::new(number).unwrap()
    }

    #[test]
    fn decodes_position_broadcast() {
        let event = GameEvent::from_value(&json!({
            "positions": {"p01": "Kitchen", "p02": "Hallway_05"}
        }))
        .unwrap();
        let GameEvent::PositionBroadcast { positions } = event else {
            panic!("expected a position broadcast");
        };
        assert_eq!(positions[&id(1)], Location::parse("Kitchen").unwrap());
        assert_eq!(positions[&id(2)], Location::hallway(5));
    }

    #[test]
    fn decodes_directed_suggestion_request() {
        let event = GameEvent::from_value(&json!({
            "suggestion": {"to_player": "p02", "cards": ["Mustard", "Lounge", "Rope"]}
        }))
        .unwrap();
        assert!(matches!(
            event,
            GameEvent::SuggestionRequest { to_player: Some(p), from_player: None, .. } if p == id(2)
        ));
    }

    #[test]
    fn move_with_suggestion_is_a_request_for_every_receiver() {
        let event = GameEvent::from_value(&json!({
            "move": "Kitchen",
            "suggestion": {"from_player": "p01", "cards": ["Scarlet", "Kitchen", "Rope"]}
        }))
        .unwrap();
        assert_eq!(
            event,
            GameEvent::SuggestionRequest {
                from_player: Some(id(1)),
                to_player: None,
                cards: [
                    Card::parse("Scarlet").unwrap(),
                    Card::parse("Kitchen").unwrap(),
                    Card::parse("Rope").unwrap()
                ],
            }
        );
    }

    #[test]
    fn decodes_directed_answer_with_move_ack() {
        let event = GameEvent::from_value(&json!({
            "move_made": true,
            "answer": {"from_player": "p02", "card": "Mustard"}
        }))
        .unwrap();
        assert_eq!(
            event,
            GameEvent::SuggestionOutcomeDirected {
                from_player: Some(id(2)),
                card: Some(Card::parse("Mustard").unwrap()),
                move_made: Some(true),
            }
        );

        let legacy = GameEvent::from_value(&json!({
            "move_completed": true,
            "answer": {"card": "no_match", "from_player": "p01"}
        }))
        .unwrap();
        assert!(matches!(
            legacy,
            GameEvent::SuggestionOutcomeDirected { card: None, move_made: Some(true), .. }
        ));
    }

    #[test]
    fn decodes_undirected_answer() {
        let event = GameEvent::from_value(&json!({
            "answer": {"from_player": "p02", "has_card": true},
            "cards": ["Plum", "Hall", "Candlestick"]
        }))
        .unwrap();
        assert!(matches!(
            event,
            GameEvent::SuggestionOutcomeUndirected { has_card: true, from_player, .. } if from_player == id(2)
        ));
        assert_eq!(event.kind(), "suggestion_outcome_undirected");
    }

    #[test]
    fn decodes_bare_move_ack() {
        let event = GameEvent::from_json(r#"{"move_made": false}"#).unwrap();
        assert_eq!(event, GameEvent::MoveAck { success: false });
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(
            GameEvent::from_value(&json!({"hello": 1})),
            Err(ClueError::MalformedEvent { .. })
        ));
        assert!(GameEvent::from_value(&json!({
            "suggestion": {"cards": ["Plum", "Hall"]}
        }))
        .is_err());
        assert!(GameEvent::from_value(&json!({
            "answer": {"from_player": "p02", "has_card": true},
            "cards": ["Plum", "Plum", "Hall"]
        }))
        .is_err());
        assert!(GameEvent::from_value(&json!({
            "positions": {"p01": "Attic"}
        }))
        .is_err());
    }

    #[test]
    fn unknown_revealed_card_is_reported() {
        let err = GameEvent::from_value(&json!({
            "answer": {"from_player": "p02", "card": "Blue"}
        }))
        .unwrap_err();
        assert_eq!(err, ClueError::invalid_card("Blue"));
    }

    #[test]
    fn turn_request_requires_positions() {
        let request = TurnRequest::from_json(r#"{"positions": {"p04": "Hallway_06"}}"#).unwrap();
        assert_eq!(request.positions.len(), 1);
        assert!(TurnRequest::from_json(r#"{"move_made": true}"#).is_err());
    }
}
