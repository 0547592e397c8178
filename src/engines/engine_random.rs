//! Uniformly random opponent.
//!
//! Needs no external engine, so it doubles as the offline opponent and as a
//! stand-in for Stockfish in session tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Opponent, OpponentError};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves;

pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn name(&self) -> &str {
        "Random mover"
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<Move, OpponentError> {
        let moves = legal_moves(game_state)?;
        moves
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or(OpponentError::NoLegalMoves)
    }
}
