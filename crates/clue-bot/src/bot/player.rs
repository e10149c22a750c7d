use super::ledger_view::LedgerView;
use super::movement::MovePlanner;
use super::params::{BotParams, TieBreaker};
use super::suggest::SuggestionPlanner;
use clue_core::board::Board;
use clue_core::error::{ClueError, ClueResult};
use clue_core::game::{
    Accusation, GameEvent, Positions, Reveal, Suggestion, TurnRequest, TurnResponse,
    UpdateResponse,
};
use clue_core::ledger::{Confirmation, Ledger};
use clue_core::model::card::{Card, Category};
use clue_core::model::hand::Hand;
use clue_core::model::location::Location;
use clue_core::model::player::PlayerId;
use clue_core::model::room::Room;
use clue_core::model::suspect::Suspect;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{Level, event};

/// A move handed to the game server and not yet acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedMove {
    pub from: Location,
    /// `None` for a blocked turn.
    pub to: Option<Location>,
    /// The destination was first entered into the visited set by this move.
    pub recorded: bool,
    /// The destination was pushed onto the move stack by this move.
    pub pushed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    #[default]
    Idle,
    MoveProposed(ProposedMove),
}

/// Autonomous Clue-Less player.
///
/// Holds its own ledger and movement history; every mutation goes through
/// `&mut self`, so one player is never driven by overlapping calls.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    id: PlayerId,
    suspect: Suspect,
    board: Arc<Board>,
    location: Location,
    visited: BTreeSet<Location>,
    move_stack: Vec<Location>,
    must_suggest: bool,
    ledger: Ledger,
    hand: Hand,
    phase: TurnPhase,
    tie_breaker: TieBreaker,
    last_suggestion: Option<Suggestion>,
}

impl AutoPlayer {
    /// Seats `suspect` for `id` in a game of `total_players`, starting on the
    /// suspect's fixed hallway.
    pub fn new(
        id: PlayerId,
        suspect: Suspect,
        board: Arc<Board>,
        total_players: usize,
        params: BotParams,
    ) -> ClueResult<Self> {
        let ledger = Ledger::new(id, total_players)?;
        let location = suspect.starting_location();
        Ok(Self {
            id,
            suspect,
            board,
            location,
            visited: BTreeSet::from([location]),
            move_stack: vec![location],
            must_suggest: false,
            ledger,
            hand: Hand::new(),
            phase: TurnPhase::Idle,
            tie_breaker: TieBreaker::new(params.tie_break, u64::from(id.number())),
            last_suggestion: None,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn suspect(&self) -> Suspect {
        self.suspect
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn visited(&self) -> &BTreeSet<Location> {
        &self.visited
    }

    /// Locations entered so far, oldest first.
    pub fn move_stack(&self) -> &[Location] {
        &self.move_stack
    }

    /// Set after another player's suggestion dragged us into a room.
    pub fn must_suggest(&self) -> bool {
        self.must_suggest
    }

    pub fn last_suggestion(&self) -> Option<&Suggestion> {
        self.last_suggestion.as_ref()
    }

    /// Adds `location` to the visited set without moving there.
    pub fn mark_visited(&mut self, location: Location) -> bool {
        self.visited.insert(location)
    }

    /// Stores the dealt hand and confirms it in the ledger.
    pub fn receive_cards<S: AsRef<str>>(&mut self, names: &[S]) -> ClueResult<&Hand> {
        if !(Hand::MIN_CARDS..=Hand::MAX_CARDS).contains(&names.len()) {
            return Err(ClueError::CardCount { count: names.len() });
        }
        let cards = names
            .iter()
            .map(|name| Card::parse(name.as_ref()))
            .collect::<ClueResult<Vec<Card>>>()?;

        let mut hand = Hand::new();
        for card in &cards {
            hand.add(*card);
        }
        for outcome in self.ledger.mark_self_dealt(hand.cards()) {
            if let Confirmation::Reassigned { previous } = outcome {
                tracing::warn!(player = %self.id, %previous, "dealt card was confirmed for another player");
            }
        }
        self.hand = hand;
        Ok(&self.hand)
    }

    /// Plays one turn: accuse when the ledger is solved, otherwise move one
    /// step and suggest if the move ends in a room.
    pub fn take_turn(&mut self, request: &TurnRequest) -> TurnResponse {
        if let TurnPhase::MoveProposed(pending) = self.phase {
            tracing::warn!(
                player = %self.id,
                to = ?pending.to,
                "previous move was never acknowledged; keeping it"
            );
            self.phase = TurnPhase::Idle;
        }

        if let Some(own) = request.positions.get(&self.id).copied()
            && own != self.location
        {
            self.location = own;
            self.visited.insert(own);
        }

        if let Some(accusation) = self.accusation() {
            self.must_suggest = false;
            return TurnResponse::Accuse(accusation);
        }

        if self.must_suggest {
            self.must_suggest = false;
            if let Some(room) = self.location.room() {
                let suggestion = self.suggest(room);
                self.phase = TurnPhase::MoveProposed(ProposedMove {
                    from: self.location,
                    to: Some(self.location),
                    recorded: false,
                    pushed: false,
                });
                return TurnResponse::Move {
                    destination: Some(self.location),
                    suggestion: Some(suggestion),
                };
            }
        }

        let occupied = occupied_by_others(&request.positions, self.id);
        let from = self.location;
        let plan = MovePlanner::choose(
            &self.board,
            from,
            &occupied,
            &self.visited,
            &mut self.tie_breaker,
        );

        let Some(plan) = plan else {
            event!(
                target: "clue_bot::movement",
                Level::DEBUG,
                player = %self.id,
                from = %from,
                "every neighbour is occupied; passing the move"
            );
            self.phase = TurnPhase::MoveProposed(ProposedMove {
                from,
                to: None,
                recorded: false,
                pushed: false,
            });
            return TurnResponse::Move {
                destination: None,
                suggestion: None,
            };
        };

        let destination = plan.destination;
        let recorded = self.visited.insert(destination);
        self.move_stack.push(destination);
        self.location = destination;
        self.phase = TurnPhase::MoveProposed(ProposedMove {
            from,
            to: Some(destination),
            recorded,
            pushed: true,
        });

        if tracing::enabled!(target: "clue_bot::movement", Level::DEBUG) {
            event!(
                target: "clue_bot::movement",
                Level::DEBUG,
                player = %self.id,
                from = %from,
                to = %destination,
                revisit = plan.revisit,
                occupied = occupied.len(),
                visited = self.visited.len(),
                "move chosen"
            );
        }

        let suggestion = destination.room().map(|room| self.suggest(room));
        TurnResponse::Move {
            destination: Some(destination),
            suggestion,
        }
    }

    /// Applies a game-state update and returns what the server should hear back.
    pub fn update(&mut self, event: GameEvent) -> ClueResult<UpdateResponse> {
        match event {
            GameEvent::PositionBroadcast { positions } => {
                self.observe_positions(&positions);
                Ok(UpdateResponse::Silent)
            }
            GameEvent::SuggestionRequest {
                from_player,
                to_player,
                cards,
            } => {
                if from_player == Some(self.id) || to_player.is_some_and(|to| to != self.id) {
                    return Ok(UpdateResponse::Silent);
                }
                Ok(UpdateResponse::Answer(self.answer(&cards)))
            }
            GameEvent::SuggestionOutcomeDirected {
                from_player,
                card,
                move_made,
            } => {
                let revealed = match card {
                    Some(card) => Some((card, self.responder(from_player)?)),
                    None => None,
                };
                if let Some(success) = move_made {
                    self.settle_move(success);
                }
                if let Some((card, holder)) = revealed {
                    self.confirm(card, holder)?;
                }
                if tracing::enabled!(target: "clue_bot::ledger", Level::DEBUG) {
                    let summary = self.ledger.summary();
                    event!(
                        target: "clue_bot::ledger",
                        Level::DEBUG,
                        player = %self.id,
                        unknown_suspects = summary.unknown_in(Category::Suspect),
                        unknown_weapons = summary.unknown_in(Category::Weapon),
                        unknown_rooms = summary.unknown_in(Category::Room),
                        pending_signals = summary.pending_signals,
                        progress = summary.progress(),
                        "ledger after answer"
                    );
                }
                Ok(UpdateResponse::TurnComplete {
                    accusation: self.accusation(),
                })
            }
            GameEvent::SuggestionOutcomeUndirected {
                from_player,
                has_card,
                cards,
            } => {
                if has_card && from_player != self.id {
                    self.ledger.record_candidate_signal(&cards, from_player)?;
                    if let Some(card) = self.ledger.resolve_signal(&cards, from_player)? {
                        tracing::debug!(
                            target: "clue_bot::ledger",
                            player = %self.id,
                            holder = %from_player,
                            card = card.as_str(),
                            "deduced the card shown"
                        );
                    }
                }
                Ok(UpdateResponse::Silent)
            }
            GameEvent::MoveAck { success } => {
                self.settle_move(success);
                Ok(UpdateResponse::TurnComplete { accusation: None })
            }
        }
    }

    /// First held card among `cards` in canonical order.
    pub fn answer(&self, cards: &[Card; 3]) -> Reveal {
        cards
            .iter()
            .copied()
            .filter(|card| self.hand.contains(*card))
            .min()
            .map_or(Reveal::NoMatch, Reveal::Card)
    }

    fn suggest(&mut self, room: Room) -> Suggestion {
        let suggestion = SuggestionPlanner::choose(
            &LedgerView::new(&self.ledger),
            room,
            self.id,
            &mut self.tie_breaker,
        );
        self.last_suggestion = Some(suggestion);
        suggestion
    }

    fn accusation(&self) -> Option<Accusation> {
        let cards = self.ledger.accusation_candidates()?;
        event!(
            target: "clue_bot::accuse",
            Level::INFO,
            player = %self.id,
            cards = ?cards.map(|card| card.as_str()),
            "accusing"
        );
        Some(Accusation {
            from_player: self.id,
            cards,
        })
    }

    /// Player who revealed a card to us; must be another tracked player.
    fn responder(&self, from_player: Option<PlayerId>) -> ClueResult<PlayerId> {
        let holder =
            from_player.ok_or_else(|| ClueError::malformed("revealed card carries no responder"))?;
        if !self.ledger.tracks(holder) {
            return Err(ClueError::UnknownPlayer { player: holder });
        }
        Ok(holder)
    }

    fn confirm(&mut self, card: Card, holder: PlayerId) -> ClueResult<()> {
        if let Confirmation::Reassigned { previous } = self.ledger.mark_confirmed(card, holder)? {
            tracing::warn!(
                player = %self.id,
                card = card.as_str(),
                %previous,
                %holder,
                "card holder reassigned"
            );
        }
        Ok(())
    }

    fn settle_move(&mut self, success: bool) {
        let TurnPhase::MoveProposed(pending) = std::mem::take(&mut self.phase) else {
            tracing::warn!(player = %self.id, success, "move acknowledged with no proposal");
            return;
        };
        if success {
            return;
        }

        if pending.pushed {
            self.move_stack.pop();
        }
        if pending.recorded
            && let Some(to) = pending.to
        {
            self.visited.remove(&to);
        }
        self.location = pending.from;
        tracing::debug!(
            target: "clue_bot::movement",
            player = %self.id,
            from = %pending.from,
            to = ?pending.to.map(|to| to.to_string()),
            "move rejected; rolled back"
        );
    }

    fn observe_positions(&mut self, positions: &Positions) {
        let Some(own) = positions.get(&self.id).copied() else {
            return;
        };
        if !matches!(self.phase, TurnPhase::Idle) || own == self.location {
            return;
        }

        self.location = own;
        self.visited.insert(own);
        self.move_stack.push(own);
        if own.is_room() {
            self.must_suggest = true;
            tracing::debug!(player = %self.id, room = %own, "summoned into a room");
        }
    }
}

fn occupied_by_others(positions: &Positions, me: PlayerId) -> BTreeSet<Location> {
    positions
        .iter()
        .filter(|(player, _)| **player != me)
        .map(|(_, location)| *location)
        .collect()
}
