use super::AutoPlayer;
use super::params::BotParams;
use clue_core::board::Board;
use clue_core::error::{ClueError, ClueResult};
use clue_core::model::player::PlayerId;
use clue_core::model::suspect::Suspect;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Seats autonomous players for one game server.
///
/// Owns the shared board, the suspect-selection RNG and the count of players
/// issued so far.
#[derive(Debug)]
pub struct PlayerRegistry {
    board: Arc<Board>,
    params: BotParams,
    capacity: usize,
    issued: usize,
    rng: StdRng,
}

impl PlayerRegistry {
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn new(board: Arc<Board>, params: BotParams) -> Self {
        Self::with_seed(board, params, rand::random())
    }

    pub fn with_seed(board: Arc<Board>, params: BotParams, seed: u64) -> Self {
        Self {
            board,
            params,
            capacity: Self::DEFAULT_CAPACITY,
            issued: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.issued)
    }

    /// Creates the player seated as `id`, taking a suspect from `available`.
    pub fn new_player(
        &mut self,
        id: PlayerId,
        available: &[Suspect],
        total_players: usize,
    ) -> ClueResult<AutoPlayer> {
        if self.issued >= self.capacity {
            return Err(ClueError::Capacity { max: self.capacity });
        }
        let suspect = *available
            .choose(&mut self.rng)
            .ok_or(ClueError::NoSuspectAvailable)?;

        let player = AutoPlayer::new(
            id,
            suspect,
            Arc::clone(&self.board),
            total_players,
            self.params,
        )?;
        self.issued += 1;

        tracing::debug!(
            target: "clue_bot::registry",
            player = %id,
            suspect = suspect.as_str(),
            start = %player.location(),
            issued = self.issued,
            "seated autonomous player"
        );
        Ok(player)
    }
}
