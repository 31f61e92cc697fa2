//! Uniform random baseline player

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::game::GameState;

/// Picks uniformly among the legal pits of the player to move
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn best_move(&mut self, state: &GameState) -> Option<usize> {
        state.legal_moves().choose(&mut self.rng).copied()
    }
}
