//! Errors returned by the rules engine and the notation layers.
//!
//! Every variant is recoverable at the call site: a front end reports the
//! message and asks for new input. No function that returns a `ChessError`
//! leaves its input state modified.

use thiserror::Error;

/// Unified error type for rules, notation, and position setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A coordinate such as `"e9"` or `"z1"` could not be interpreted.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A well-formed move that is not in the legal move set of the position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The game state is impossible (missing king, side not to move in
    /// check, inconsistent castling rights, ...).
    #[error("invalid game state: {0}")]
    InvalidState(String),

    /// A FEN string that does not follow the six-field layout.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Move text that is neither valid SAN nor long algebraic, or that is
    /// ambiguous in the current position.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
