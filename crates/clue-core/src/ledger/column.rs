use crate::model::card::Card;

/// Cells tracked for a single player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerColumn {
    confirmed: [bool; Card::COUNT],
    signals: [Vec<u32>; Card::COUNT],
}

impl PlayerColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_confirmed(&self, card: Card) -> bool {
        self.confirmed[card.to_id() as usize]
    }

    /// Sequence numbers of unresolved "holds one of three" signals touching `card`.
    pub fn signals(&self, card: Card) -> &[u32] {
        &self.signals[card.to_id() as usize]
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed.iter().filter(|held| **held).count()
    }

    pub fn pending_signal_count(&self) -> usize {
        self.signals.iter().map(Vec::len).sum()
    }

    pub(crate) fn set_confirmed(&mut self, card: Card, held: bool) {
        self.confirmed[card.to_id() as usize] = held;
    }

    pub(crate) fn push_signal(&mut self, card: Card, sequence: u32) {
        self.signals[card.to_id() as usize].push(sequence);
    }

    pub(crate) fn clear_signals(&mut self, card: Card) {
        self.signals[card.to_id() as usize].clear();
    }

    pub(crate) fn max_signal(&self, card: Card) -> u32 {
        self.signals(card).iter().copied().max().unwrap_or(0)
    }
}
