//! Attack and check detection.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, rook_attacks};

/// True when any piece of `attacker_color` attacks `square` on `board`.
///
/// Works backwards from the target: a knight on X attacks the target iff a
/// knight on the target would attack X, and likewise for every other kind
/// (pawns with the colors swapped).
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let them = |kind: PieceKind| board.pieces(attacker_color, kind);
    let occupancy = board.occupied();

    if pawn_attacks(attacker_color.opposite(), square) & them(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & them(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & them(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = them(PieceKind::Bishop) | them(PieceKind::Queen);
    if diagonal != 0 && bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = them(PieceKind::Rook) | them(PieceKind::Queen);
    straight != 0 && rook_attacks(square, occupancy) & straight != 0
}

/// Check test without state validation, for use inside move generation.
pub(crate) fn king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}

/// True iff an enemy piece attacks `color`'s king.
pub fn is_in_check(game_state: &GameState, color: Color) -> ChessResult<bool> {
    game_state.validate()?;
    Ok(king_in_check(game_state.board(), color))
}
