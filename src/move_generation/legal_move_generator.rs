//! Full legal move generation.
//!
//! Generates pseudo-legal moves per piece kind, plays each on a scratch
//! board, and keeps only those that leave the mover's king unattacked.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::play_on_board;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::move_generator::generate_pseudo_legal_moves;

/// Every move the side to move may play. Order is deterministic (by piece
/// kind, then source square, then destination).
pub fn legal_moves(game_state: &GameState) -> ChessResult<Vec<Move>> {
    game_state.validate()?;
    Ok(legal_moves_unchecked(game_state))
}

pub(crate) fn legal_moves_unchecked(game_state: &GameState) -> Vec<Move> {
    generate_pseudo_legal_moves(game_state)
        .into_iter()
        .filter(|&mv| keeps_king_safe(game_state, mv))
        .collect()
}

/// True when the side to move has at least one legal move.
pub(crate) fn has_legal_move(game_state: &GameState) -> bool {
    generate_pseudo_legal_moves(game_state)
        .into_iter()
        .any(|mv| keeps_king_safe(game_state, mv))
}

fn keeps_king_safe(game_state: &GameState, mv: Move) -> bool {
    play_on_board(game_state.board(), game_state.en_passant_square(), mv)
        .is_some_and(|(board, _)| !king_in_check(&board, game_state.side_to_move()))
}

#[cfg(test)]
mod tests {
    use super::legal_moves;
    use crate::game_state::chess_types::{Move, Square};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let moves = legal_moves(&GameState::new_game()).expect("valid state");
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn every_legal_move_applies_and_passes_the_turn() {
        let game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let moves = legal_moves(&game).expect("valid state");
        assert_eq!(moves.len(), 48);
        for mv in moves {
            let next = apply_move(&game, mv).expect("generated move should apply");
            assert_eq!(next.side_to_move(), game.side_to_move().opposite());
        }
    }

    #[test]
    fn king_in_check_must_respond() {
        // Unprotected queen on e2 covers every flight square; only Kxe2 remains.
        let game = GameState::from_fen("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = legal_moves(&game).expect("valid state");
        assert_eq!(moves, vec![Move::new(sq("e1"), sq("e2"))]);
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        // bxc6 e.p. would clear rank 5 between the h5 rook and the king.
        let game = GameState::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 2")
            .expect("FEN should parse");
        let moves = legal_moves(&game).expect("valid state");
        assert!(!moves.contains(&Move::new(sq("b5"), sq("c6"))));
        assert!(moves.contains(&Move::new(sq("b5"), sq("b6"))));
    }
}
