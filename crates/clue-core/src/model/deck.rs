use crate::model::card::{Card, Category};
use crate::model::hand::Hand;
use crate::model::room::Room;
use crate::model::suspect::Suspect;
use crate::model::weapon::Weapon;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// The three hidden cards of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solution {
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl Solution {
    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Suspect(self.suspect),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }

    /// True when `cards` names exactly the hidden cards, in any order.
    pub fn matches(&self, cards: &[Card]) -> bool {
        let mut expected = self.cards();
        let mut given = cards.to_vec();
        expected.sort();
        given.sort();
        given == expected
    }
}

/// A dealt game: the hidden solution plus one hand per player.
#[derive(Debug, Clone)]
pub struct Deal {
    pub solution: Solution,
    pub hands: Vec<Hand>,
}

impl Deck {
    pub fn standard() -> Self {
        Self {
            cards: Card::ALL.to_vec(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Hides the first card of each category and deals the rest round-robin.
    pub fn deal(&self, players: usize) -> Option<Deal> {
        if players == 0 {
            return None;
        }
        let first = |category: Category| {
            self.cards
                .iter()
                .copied()
                .find(|card| card.category() == category)
        };
        let solution = Solution {
            suspect: first(Category::Suspect)?.suspect()?,
            weapon: first(Category::Weapon)?.weapon()?,
            room: first(Category::Room)?.room()?,
        };
        let hidden = solution.cards();

        let mut hands = vec![Hand::new(); players];
        let dealt = self.cards.iter().filter(|card| !hidden.contains(card));
        for (i, card) in dealt.enumerate() {
            hands[i % players].add(*card);
        }

        Some(Deal { solution, hands })
    }
}
