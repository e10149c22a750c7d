use super::Ledger;
use crate::model::card::{Card, Category};
use crate::model::player::PlayerId;

/// Coarse view of a ledger used for structured logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub owner: PlayerId,
    pub unknown_per_category: [usize; 3],
    pub confirmed_per_player: Vec<usize>,
    pub pending_signals: usize,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut unknown_per_category = [0; 3];
        for card in ledger.unknown_cards() {
            unknown_per_category[card.category().index()] += 1;
        }

        let mut confirmed_per_player = Vec::with_capacity(ledger.player_count());
        let mut pending_signals = 0;
        for player in ledger.players() {
            if let Some(column) = ledger.column(player) {
                confirmed_per_player.push(column.confirmed_count());
                pending_signals += column.pending_signal_count();
            }
        }

        Self {
            owner: ledger.owner(),
            unknown_per_category,
            confirmed_per_player,
            pending_signals,
        }
    }

    pub fn unknown_total(&self) -> usize {
        self.unknown_per_category.iter().sum()
    }

    pub fn unknown_in(&self, category: Category) -> usize {
        self.unknown_per_category[category.index()]
    }

    /// Share of the 18 dealt cards whose holder is known.
    pub fn progress(&self) -> f32 {
        let dealt = (Card::COUNT - 3) as f32;
        let known = Card::COUNT.saturating_sub(self.unknown_total()) as f32;
        (known / dealt).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::Ledger;
    use crate::model::card::{Card, Category};
    use crate::model::player::PlayerId;

    #[test]
    fn counts_unknown_cards_per_category() {
        let owner = PlayerId::new(2).unwrap();
        let mut ledger = Ledger::new(owner, 3).unwrap();
        ledger.mark_self_dealt(&[
            Card::parse("Scarlet").unwrap(),
            Card::parse("Knife").unwrap(),
            Card::parse("Hall").unwrap(),
            Card::parse("Study").unwrap(),
        ]);

        let summary = ledger.summary();
        assert_eq!(summary.unknown_in(Category::Suspect), 5);
        assert_eq!(summary.unknown_in(Category::Weapon), 5);
        assert_eq!(summary.unknown_in(Category::Room), 7);
        assert_eq!(summary.confirmed_per_player, vec![0, 4, 0]);
        assert_eq!(summary.pending_signals, 0);
        assert!((summary.progress() - 4.0 / 18.0).abs() < 1e-6);
    }
}
