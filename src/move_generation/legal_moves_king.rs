//! King destinations: single steps plus castling.
//!
//! Castling targets are only emitted when the full rule holds: the right is
//! still held (king and rook unmoved), the squares between are empty, the
//! king is not in check, and it neither crosses nor lands on an attacked
//! square. Single steps are filtered for king safety by the legal filter.

use crate::game_state::board::squares;
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::leaper_attacks::king_attacks;

pub fn king_destinations(game_state: &GameState, from: Square) -> u64 {
    let own = game_state.board().occupancy(game_state.side_to_move());
    (king_attacks(from) & !own) | castling_destinations(game_state, from)
}

pub fn castling_destinations(game_state: &GameState, king_from: Square) -> u64 {
    let side = game_state.side_to_move();
    let enemy = side.opposite();
    let board = game_state.board();
    let mut targets = 0u64;

    for castle_side in CastleSide::BOTH {
        if !game_state.castling_rights().has(side, castle_side) {
            continue;
        }

        let geometry = castling_geometry(side, castle_side);
        if geometry.king_from != king_from
            || board.piece_at(geometry.rook_from) != Some(Piece::new(side, PieceKind::Rook))
            || board.occupied() & geometry.must_be_empty != 0
        {
            continue;
        }

        // Cannot castle out of check.
        if is_square_attacked(board, king_from, enemy) {
            return 0;
        }

        let path_attacked = squares(geometry.king_path)
            .any(|sq| is_square_attacked(board, sq, enemy));
        if !path_attacked {
            targets |= geometry.king_to.bit();
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::castling_destinations;
    use crate::game_state::board::squares;
    use crate::game_state::game_state::GameState;

    fn castles(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let king = game
            .board()
            .king_square(game.side_to_move())
            .expect("side to move has a king");
        squares(castling_destinations(&game, king))
            .map(|sq| sq.to_string())
            .collect()
    }

    #[test]
    fn both_wings_available_on_open_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), ["c1", "g1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), ["c8", "g8"]);
    }

    #[test]
    fn lost_rights_block_castling() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Q - 0 1"), ["c1"]);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").is_empty());
    }

    #[test]
    fn occupied_path_blocks_castling() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1"), Vec::<String>::new());
        // b1 only needs to be empty, not safe.
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["c1", "g1"]);
    }

    #[test]
    fn attacked_path_or_check_blocks_castling() {
        // Bishop on a6 covers f1.
        assert_eq!(castles("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1"), ["c1"]);
        // Rook on g8 covers the landing square g1.
        assert_eq!(castles("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["c1"]);
        // Rook on b8 attacks b1, which the king never crosses.
        assert_eq!(castles("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), ["c1", "g1"]);
        // In check from e8 rook: no castling at all.
        assert!(castles("1k2r3/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }
}
