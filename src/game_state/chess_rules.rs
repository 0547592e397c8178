//! Canonical chess-rule constants and castling geometry.

use crate::game_state::chess_types::{CastleSide, Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that draw the game.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// King and rook squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty between king and rook.
    pub must_be_empty: u64,
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: u64,
}

pub const fn castling_geometry(color: Color, side: CastleSide) -> CastlingGeometry {
    match side {
        CastleSide::Kingside => CastlingGeometry {
            king_from: home(color, 4),
            king_to: home(color, 6),
            rook_from: home(color, 7),
            rook_to: home(color, 5),
            must_be_empty: home(color, 5).bit() | home(color, 6).bit(),
            king_path: home(color, 5).bit() | home(color, 6).bit(),
        },
        CastleSide::Queenside => CastlingGeometry {
            king_from: home(color, 4),
            king_to: home(color, 2),
            rook_from: home(color, 0),
            rook_to: home(color, 3),
            must_be_empty: home(color, 1).bit() | home(color, 2).bit() | home(color, 3).bit(),
            king_path: home(color, 3).bit() | home(color, 2).bit(),
        },
    }
}

#[inline]
const fn home(color: Color, file: u8) -> Square {
    Square::at(color.home_rank() * 8 + file)
}
