use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use std::collections::BTreeSet;

/// How the bot breaks ties between equally good candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Always take the first candidate in canonical order.
    Ordered,
    /// Draw uniformly with a per-player RNG derived from this seed.
    Seeded(u64),
}

impl Default for TieBreak {
    fn default() -> Self {
        Self::Ordered
    }
}

impl TieBreak {
    /// Parses `ordered`, `seeded` or `seeded:<u64>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        match lowered.split_once(':') {
            None if lowered == "ordered" => Some(TieBreak::Ordered),
            None if lowered == "seeded" => Some(TieBreak::Seeded(0)),
            Some(("seeded", seed)) => seed.trim().parse().ok().map(TieBreak::Seeded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotParams {
    pub tie_break: TieBreak,
}

impl BotParams {
    pub const fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let tie_break = read("CLUE_TIE_BREAK")
            .and_then(|raw| TieBreak::parse(&raw))
            .unwrap_or_default();
        Self { tie_break }
    }
}

/// Picks among candidate sets according to a [`TieBreak`].
#[derive(Debug, Clone)]
pub struct TieBreaker {
    rng: Option<StdRng>,
}

impl TieBreaker {
    /// `salt` separates the streams of players sharing one seed.
    pub fn new(tie_break: TieBreak, salt: u64) -> Self {
        let rng = match tie_break {
            TieBreak::Ordered => None,
            TieBreak::Seeded(seed) => Some(StdRng::seed_from_u64(seed ^ salt.rotate_left(32))),
        };
        Self { rng }
    }

    pub fn pick<T: Copy + Ord>(&mut self, candidates: &BTreeSet<T>) -> Option<T> {
        match self.rng.as_mut() {
            None => candidates.first().copied(),
            Some(rng) => candidates.iter().copied().choose(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BotParams, TieBreak, TieBreaker};
    use std::collections::BTreeSet;

    #[test]
    fn params_from_env_default_fallbacks() {
        let params = BotParams::from_reader(|_| None);
        assert_eq!(params.tie_break, TieBreak::Ordered);

        let garbage = BotParams::from_reader(|_| Some("sometimes".to_string()));
        assert_eq!(garbage.tie_break, TieBreak::Ordered);
    }

    #[test]
    fn params_from_env_respects_seed() {
        let params = BotParams::from_reader(|key| match key {
            "CLUE_TIE_BREAK" => Some("Seeded:42".to_string()),
            _ => None,
        });
        assert_eq!(params.tie_break, TieBreak::Seeded(42));
        assert_eq!(TieBreak::parse("seeded"), Some(TieBreak::Seeded(0)));
        assert_eq!(TieBreak::parse("seeded:x"), None);
    }

    #[test]
    fn ordered_takes_the_smallest() {
        let mut breaker = TieBreaker::new(TieBreak::Ordered, 3);
        let candidates: BTreeSet<u8> = [9, 4, 7].into_iter().collect();
        assert_eq!(breaker.pick(&candidates), Some(4));
        assert_eq!(breaker.pick(&BTreeSet::<u8>::new()), None);
    }

    #[test]
    fn seeded_is_reproducible() {
        let candidates: BTreeSet<u8> = (0..20).collect();
        let mut a = TieBreaker::new(TieBreak::Seeded(11), 2);
        let mut b = TieBreaker::new(TieBreak::Seeded(11), 2);
        let picks_a: Vec<_> = (0..8).map(|_| a.pick(&candidates)).collect();
        let picks_b: Vec<_> = (0..8).map(|_| b.pick(&candidates)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|pick| pick.is_some()));
    }
}
