//! Pseudo-legal move generation.
//!
//! Each piece kind maps to a pure destination function; the dispatch is a
//! plain `match`, so every generator can be exercised in isolation.

use crate::game_state::board::squares;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_moves_bishop::bishop_destinations;
use crate::move_generation::legal_moves_king::king_destinations;
use crate::move_generation::legal_moves_knight::knight_destinations;
use crate::move_generation::legal_moves_pawn::pawn_destinations;
use crate::move_generation::legal_moves_queen::queen_destinations;
use crate::move_generation::legal_moves_rook::rook_destinations;

/// Destinations for a piece of `kind` standing on `from`, owned by the side
/// to move. Ignores whether the move would leave the mover's king in check.
pub fn pseudo_legal_destinations(kind: PieceKind, game_state: &GameState, from: Square) -> u64 {
    match kind {
        PieceKind::Pawn => pawn_destinations(game_state, from),
        PieceKind::Knight => knight_destinations(game_state, from),
        PieceKind::Bishop => bishop_destinations(game_state, from),
        PieceKind::Rook => rook_destinations(game_state, from),
        PieceKind::Queen => queen_destinations(game_state, from),
        PieceKind::King => king_destinations(game_state, from),
    }
}

/// Every pseudo-legal move of the side to move. Pawn moves onto the last
/// rank expand into one move per promotion kind.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let side = game_state.side_to_move();
    let mut out = Vec::with_capacity(64);

    for kind in PieceKind::ALL {
        for from in squares(game_state.board().pieces(side, kind)) {
            for to in squares(pseudo_legal_destinations(kind, game_state, from)) {
                if kind == PieceKind::Pawn && to.rank() == side.promotion_rank() {
                    out.extend(
                        PieceKind::PROMOTIONS
                            .iter()
                            .map(|&promo| Move::with_promotion(from, to, promo)),
                    );
                } else {
                    out.push(Move::new(from, to));
                }
            }
        }
    }

    out
}
