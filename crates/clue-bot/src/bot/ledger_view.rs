use clue_core::ledger::Ledger;
use clue_core::model::card::Card;
use clue_core::model::suspect::Suspect;
use clue_core::model::weapon::Weapon;
use std::collections::BTreeSet;

/// Lightweight view over a [`Ledger`] used by the planners.
#[derive(Debug, Clone, Copy)]
pub struct LedgerView<'a> {
    ledger: &'a Ledger,
}

impl<'a> LedgerView<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &'a Ledger {
        self.ledger
    }

    /// Suspects nobody is confirmed to hold.
    pub fn unknown_suspects(&self) -> BTreeSet<Suspect> {
        self.ledger
            .unknown_cards()
            .into_iter()
            .filter_map(Card::suspect)
            .collect()
    }

    /// Weapons nobody is confirmed to hold.
    pub fn unknown_weapons(&self) -> BTreeSet<Weapon> {
        self.ledger
            .unknown_cards()
            .into_iter()
            .filter_map(Card::weapon)
            .collect()
    }
}
