use crate::model::card::Card;
use std::vec::Vec;

/// Cards dealt to one player, kept in canonical card order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub const MIN_CARDS: usize = 3;
    pub const MAX_CARDS: usize = 6;

    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        if !self.contains(card) {
            self.cards.push(card);
            self.sort();
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Hand sizes a game of `players` deals from the 18 non-hidden cards.
    pub fn expected_sizes(players: usize) -> (usize, usize) {
        let dealt = Card::COUNT - 3;
        let players = players.max(1);
        (dealt / players, dealt.div_ceil(players))
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}
