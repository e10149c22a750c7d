use std::sync::Arc;

use clue_bot::{AutoPlayer, BotParams, PlayerRegistry};
use clue_core::board::Board;
use clue_core::game::{
    Accusation, GameEvent, Positions, Reveal, Suggestion, TurnRequest, TurnResponse,
    UpdateResponse,
};
use clue_core::model::deck::{Deck, Solution};
use clue_core::model::location::Location;
use clue_core::model::player::PlayerId;
use clue_core::model::suspect::Suspect;
use tracing::{Level, event};

use super::RunnerError;

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Solved,
    /// Every player accused wrongly.
    Exhausted,
    /// `max_turns` ran out.
    Stalled,
}

impl GameStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::Solved => "solved",
            GameStatus::Exhausted => "exhausted",
            GameStatus::Stalled => "stalled",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub solution: Solution,
    pub winner: Option<(PlayerId, Suspect)>,
    pub status: GameStatus,
    pub turns: usize,
    pub suggestions: usize,
    pub blocked_moves: usize,
    pub wrong_accusations: usize,
}

struct Seat {
    player: AutoPlayer,
    eliminated: bool,
}

/// One game in progress: the dealt solution, the seated players and where
/// everybody stands.
pub struct GameTable {
    board: Arc<Board>,
    solution: Solution,
    seats: Vec<Seat>,
    positions: Positions,
    suggestions: usize,
    blocked_moves: usize,
    wrong_accusations: usize,
}

impl GameTable {
    /// Deals a fresh deck from `seed` and seats `players` autonomous players.
    pub fn deal(
        board: Arc<Board>,
        params: BotParams,
        players: usize,
        seed: u64,
    ) -> Result<Self, RunnerError> {
        let deck = Deck::shuffled_with_seed(seed);
        let deal = deck
            .deal(players)
            .ok_or_else(|| RunnerError::game(format!("cannot deal to {players} players")))?;

        let mut registry = PlayerRegistry::with_seed(Arc::clone(&board), params, seed);
        let mut available = Suspect::ALL.to_vec();
        let mut seats = Vec::with_capacity(players);
        let mut positions = Positions::new();

        for (id, hand) in PlayerId::roster(players).zip(&deal.hands) {
            let mut player = registry.new_player(id, &available, players)?;
            available.retain(|suspect| *suspect != player.suspect());
            let names: Vec<&str> = hand.iter().map(|card| card.as_str()).collect();
            player.receive_cards(&names)?;
            positions.insert(id, player.location());
            seats.push(Seat {
                player,
                eliminated: false,
            });
        }

        Ok(Self {
            board,
            solution: deal.solution,
            seats,
            positions,
            suggestions: 0,
            blocked_moves: 0,
            wrong_accusations: 0,
        })
    }

    pub fn solution(&self) -> Solution {
        self.solution
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    /// Plays turns in id order until someone solves the case, everybody is
    /// out, or `max_turns` is reached.
    pub fn play(mut self, max_turns: usize) -> Result<GameOutcome, RunnerError> {
        let mut seat = 0usize;
        let mut turns = 0usize;

        while turns < max_turns {
            if self.seats.iter().all(|s| s.eliminated) {
                return Ok(self.finish(None, GameStatus::Exhausted, turns));
            }
            if self.seats[seat].eliminated {
                seat = (seat + 1) % self.seats.len();
                continue;
            }

            turns += 1;
            if let Some(winner) = self.play_turn(seat)? {
                return Ok(self.finish(Some(winner), GameStatus::Solved, turns));
            }
            seat = (seat + 1) % self.seats.len();
        }

        Ok(self.finish(None, GameStatus::Stalled, turns))
    }

    fn finish(self, winner: Option<usize>, status: GameStatus, turns: usize) -> GameOutcome {
        let winner = winner.map(|index| {
            let player = &self.seats[index].player;
            (player.id(), player.suspect())
        });
        GameOutcome {
            solution: self.solution,
            winner,
            status,
            turns,
            suggestions: self.suggestions,
            blocked_moves: self.blocked_moves,
            wrong_accusations: self.wrong_accusations,
        }
    }

    /// Returns the winning seat when the turn ends with a correct accusation.
    fn play_turn(&mut self, seat: usize) -> Result<Option<usize>, RunnerError> {
        self.broadcast_positions()?;

        let request = TurnRequest::new(self.positions.clone());
        let response = self.seats[seat].player.take_turn(&request);

        let (destination, suggestion) = match response {
            TurnResponse::Accuse(accusation) => return Ok(self.judge(seat, &accusation)),
            TurnResponse::Move {
                destination,
                suggestion,
            } => (destination, suggestion),
        };

        let id = self.seats[seat].player.id();
        let accepted = destination.is_some_and(|to| self.is_legal_move(id, to));
        if destination.is_none() {
            self.blocked_moves += 1;
        }
        if let Some(to) = destination.filter(|_| accepted) {
            self.positions.insert(id, to);
        }

        match suggestion.filter(|_| accepted) {
            Some(suggestion) => self.relay_suggestion(seat, suggestion),
            None => {
                self.seats[seat]
                    .player
                    .update(GameEvent::MoveAck { success: accepted })?;
                Ok(None)
            }
        }
    }

    fn broadcast_positions(&mut self) -> Result<(), RunnerError> {
        for seat in &mut self.seats {
            seat.player.update(GameEvent::PositionBroadcast {
                positions: self.positions.clone(),
            })?;
        }
        Ok(())
    }

    /// Staying put is only legal for a player summoned into its room.
    fn is_legal_move(&self, id: PlayerId, to: Location) -> bool {
        let Some(from) = self.positions.get(&id).copied() else {
            return false;
        };
        if from == to {
            return to.is_room();
        }
        self.board.is_adjacent(from, to)
            && !self
                .positions
                .iter()
                .any(|(other, location)| *other != id && *location == to)
    }

    fn relay_suggestion(
        &mut self,
        seat: usize,
        suggestion: Suggestion,
    ) -> Result<Option<usize>, RunnerError> {
        self.suggestions += 1;
        let suggester = self.seats[seat].player.id();
        let cards = suggestion.cards();
        self.summon(suggester, suggestion);

        let count = self.seats.len();
        let mut outcomes: Vec<(usize, bool)> = Vec::new();
        let mut revealed = None;
        for offset in 1..count {
            let other = (seat + offset) % count;
            let to_player = self.seats[other].player.id();
            let answer = self.seats[other].player.update(GameEvent::SuggestionRequest {
                from_player: Some(suggester),
                to_player: Some(to_player),
                cards,
            })?;
            match answer {
                UpdateResponse::Answer(Reveal::Card(card)) => {
                    outcomes.push((other, true));
                    revealed = Some((to_player, card));
                    break;
                }
                _ => outcomes.push((other, false)),
            }
        }

        let directed = self.seats[seat]
            .player
            .update(GameEvent::SuggestionOutcomeDirected {
                from_player: revealed.map(|(responder, _)| responder),
                card: revealed.map(|(_, card)| card),
                move_made: Some(true),
            })?;

        for (responder, has_card) in outcomes {
            let from_player = self.seats[responder].player.id();
            for (index, observer) in self.seats.iter_mut().enumerate() {
                if index == seat || index == responder {
                    continue;
                }
                observer.player.update(GameEvent::SuggestionOutcomeUndirected {
                    from_player,
                    has_card,
                    cards,
                })?;
            }
        }

        match directed.accusation() {
            Some(accusation) => Ok(self.judge(seat, accusation)),
            None => Ok(None),
        }
    }

    /// Moves the player of the suggested suspect into the suggestion room.
    fn summon(&mut self, suggester: PlayerId, suggestion: Suggestion) {
        let summoned = self
            .seats
            .iter()
            .map(|seat| &seat.player)
            .find(|player| player.suspect() == suggestion.suspect && player.id() != suggester)
            .map(AutoPlayer::id);
        if let Some(id) = summoned {
            self.positions.insert(id, Location::Room(suggestion.room));
        }
    }

    fn judge(&mut self, seat: usize, accusation: &Accusation) -> Option<usize> {
        let correct = self.solution.matches(&accusation.cards);
        if tracing::enabled!(target: "clue_bench::table", Level::INFO) {
            event!(
                target: "clue_bench::table",
                Level::INFO,
                player = %accusation.from_player,
                cards = ?accusation.cards.map(|card| card.as_str()),
                correct,
                "accusation judged"
            );
        }
        if correct {
            Some(seat)
        } else {
            self.wrong_accusations += 1;
            self.seats[seat].eliminated = true;
            None
        }
    }
}
