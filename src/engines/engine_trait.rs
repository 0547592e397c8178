//! Computer opponent abstraction.
//!
//! The game session asks an `Opponent` for one move at a time. The state is
//! only borrowed for the exchange; the session applies the returned move
//! through the rules engine like any human move.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::errors::ChessError;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

#[derive(Debug, Error)]
pub enum OpponentError {
    #[error("engine executable not found: {0}")]
    NotFound(String),

    #[error("engine I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("engine closed its output")]
    Disconnected,

    #[error("engine did not answer '{waiting_for}' within {timeout:?}")]
    Timeout {
        waiting_for: String,
        timeout: Duration,
    },

    #[error("unexpected engine reply: {0}")]
    Protocol(String),

    #[error(transparent)]
    Rules(#[from] ChessError),

    #[error("no legal moves available")]
    NoLegalMoves,
}

pub trait Opponent {
    fn name(&self) -> &str;

    /// Pick a move for the side to move. The move is expected to be legal
    /// in `game_state`.
    fn choose_move(&mut self, game_state: &GameState) -> Result<Move, OpponentError>;
}
