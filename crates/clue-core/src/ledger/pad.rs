use super::column::PlayerColumn;
use super::summary::LedgerSummary;
use crate::error::{ClueError, ClueResult};
use crate::model::card::Card;
use crate::model::player::PlayerId;
use std::collections::BTreeSet;

/// Outcome of confirming a card holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The holder was not known before.
    Recorded,
    /// The same holder had already been confirmed; nothing changed.
    AlreadyKnown,
    /// A different player had been confirmed for the card and was overwritten.
    Reassigned { previous: PlayerId },
}

/// Belief matrix kept by one autonomous player: one column per tracked player,
/// one row per card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    owner: PlayerId,
    columns: Vec<PlayerColumn>,
}

impl Ledger {
    /// Creates an empty ledger tracking `p01..pNN` for a game of `players`.
    pub fn new(owner: PlayerId, players: usize) -> ClueResult<Self> {
        if !(PlayerId::MIN_PLAYERS..=PlayerId::MAX_PLAYERS).contains(&players) {
            return Err(ClueError::PlayerCount { count: players });
        }
        if owner.index() >= players {
            return Err(ClueError::UnknownPlayer { player: owner });
        }
        Ok(Self {
            owner,
            columns: vec![PlayerColumn::new(); players],
        })
    }

    /// Player whose perspective this ledger records.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn player_count(&self) -> usize {
        self.columns.len()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::roster(self.columns.len())
    }

    pub fn tracks(&self, player: PlayerId) -> bool {
        player.index() < self.columns.len()
    }

    pub fn column(&self, player: PlayerId) -> Option<&PlayerColumn> {
        self.columns.get(player.index())
    }

    /// Confirmed holder of `card`, if any.
    pub fn holder_of(&self, card: Card) -> Option<PlayerId> {
        self.columns
            .iter()
            .position(|column| column.is_confirmed(card))
            .and_then(PlayerId::from_index)
    }

    pub fn holds(&self, player: PlayerId, card: Card) -> bool {
        self.column(player)
            .map(|column| column.is_confirmed(card))
            .unwrap_or(false)
    }

    pub fn signals(&self, player: PlayerId, card: Card) -> &[u32] {
        self.column(player)
            .map(|column| column.signals(card))
            .unwrap_or(&[])
    }

    /// Records `holder` as the owner of `card`.
    ///
    /// Ownership is exclusive: any other confirmed holder is cleared, and the
    /// card's suggestion-response cells are emptied for every player.
    pub fn mark_confirmed(&mut self, card: Card, holder: PlayerId) -> ClueResult<Confirmation> {
        self.ensure_tracked(holder)?;

        let outcome = match self.holder_of(card) {
            Some(previous) if previous == holder => return Ok(Confirmation::AlreadyKnown),
            Some(previous) => Confirmation::Reassigned { previous },
            None => Confirmation::Recorded,
        };

        for (index, column) in self.columns.iter_mut().enumerate() {
            column.set_confirmed(card, index == holder.index());
            column.clear_signals(card);
        }

        Ok(outcome)
    }

    /// Marks the owner's own dealt hand.
    pub fn mark_self_dealt(&mut self, cards: &[Card]) -> Vec<Confirmation> {
        let owner = self.owner;
        cards
            .iter()
            .filter_map(|card| self.mark_confirmed(*card, owner).ok())
            .collect()
    }

    /// Records that `responder` publicly matched one of `cards` without
    /// revealing which. Returns the sequence number appended to each cell.
    pub fn record_candidate_signal(
        &mut self,
        cards: &[Card; 3],
        responder: PlayerId,
    ) -> ClueResult<u32> {
        self.ensure_tracked(responder)?;
        let column = &mut self.columns[responder.index()];
        let sequence = cards
            .iter()
            .map(|card| column.max_signal(*card))
            .max()
            .unwrap_or(0)
            + 1;
        for card in cards {
            column.push_signal(*card, sequence);
        }
        Ok(sequence)
    }

    /// Deduces which card `responder` showed when only one candidate is left.
    ///
    /// If the responder is not already known to hold any of `cards`, and every
    /// card but one is confirmed for somebody else, the remaining card must be
    /// theirs. Returns the card confirmed this way.
    pub fn resolve_signal(
        &mut self,
        cards: &[Card; 3],
        responder: PlayerId,
    ) -> ClueResult<Option<Card>> {
        self.ensure_tracked(responder)?;
        if cards.iter().any(|card| self.holds(responder, *card)) {
            return Ok(None);
        }

        let mut open = cards.iter().copied().filter(|card| self.holder_of(*card).is_none());
        match (open.next(), open.next()) {
            (Some(card), None) => {
                self.mark_confirmed(card, responder)?;
                Ok(Some(card))
            }
            _ => Ok(None),
        }
    }

    /// Cards with no confirmed holder, in canonical order. The three hidden
    /// cards always remain here.
    pub fn unknown_cards(&self) -> BTreeSet<Card> {
        Card::ALL
            .into_iter()
            .filter(|card| self.holder_of(*card).is_none())
            .collect()
    }

    /// The accusation implied by the ledger: exactly three unknown cards.
    ///
    /// Category balance is not checked.
    pub fn accusation_candidates(&self) -> Option<[Card; 3]> {
        let unknown = self.unknown_cards();
        if unknown.len() != 3 {
            return None;
        }
        let mut cards = unknown.into_iter();
        Some([cards.next()?, cards.next()?, cards.next()?])
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_ledger(self)
    }

    fn ensure_tracked(&self, player: PlayerId) -> ClueResult<()> {
        if self.tracks(player) {
            Ok(())
        } else {
            Err(ClueError::UnknownPlayer { player })
        }
    }
}
