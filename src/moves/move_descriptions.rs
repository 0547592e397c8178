//! Derived move classification.
//!
//! A `Move` only carries squares and an optional promotion. Whether it is a
//! capture, en passant, castle or double pawn push follows from the board it
//! is played on, and is computed here instead of being stored in the move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDescription {
    pub moved: Piece,
    pub captured: Option<PieceKind>,
    /// Square the captured piece stood on (differs from `to` for en passant).
    pub capture_square: Option<Square>,
    pub is_en_passant: bool,
    pub castle: Option<CastleSide>,
    pub is_double_pawn_push: bool,
    pub promotion: Option<PieceKind>,
}

impl MoveDescription {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Pawn moves and captures reset the half-move clock.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.moved.kind == PieceKind::Pawn || self.is_capture()
    }
}

/// Classify `mv` against `board`. Returns `None` when the source square is
/// empty; no legality check is made.
pub fn describe_move(
    board: &Board,
    en_passant_square: Option<Square>,
    mv: Move,
) -> Option<MoveDescription> {
    let moved = board.piece_at(mv.from)?;
    let target = board.piece_at(mv.to);
    let file_delta = mv.to.file() as i8 - mv.from.file() as i8;
    let rank_delta = mv.to.rank() as i8 - mv.from.rank() as i8;

    let mut description = MoveDescription {
        moved,
        captured: target.map(|p| p.kind),
        capture_square: target.map(|_| mv.to),
        is_en_passant: false,
        castle: None,
        is_double_pawn_push: false,
        promotion: mv.promotion,
    };

    match moved.kind {
        PieceKind::Pawn => {
            if rank_delta.abs() == 2 {
                description.is_double_pawn_push = true;
            } else if file_delta != 0 && target.is_none() && en_passant_square == Some(mv.to) {
                // The captured pawn sits beside the mover, on the origin rank.
                let victim = Square::at(mv.from.rank() * 8 + mv.to.file());
                description.is_en_passant = true;
                description.captured = Some(PieceKind::Pawn);
                description.capture_square = Some(victim);
            }
        }
        PieceKind::King if file_delta.abs() == 2 && rank_delta == 0 => {
            description.castle = Some(if file_delta > 0 {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            });
        }
        _ => {}
    }

    Some(description)
}
