//! Pawn destinations: single and double pushes, diagonal captures, and the
//! en-passant capture. Promotion choices are expanded by the caller.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::leaper_attacks::pawn_attacks;

pub fn pawn_destinations(game_state: &GameState, from: Square) -> u64 {
    let side = game_state.side_to_move();
    let board = game_state.board();
    let empty = !board.occupied();
    let direction = side.pawn_direction();
    let mut targets = 0u64;

    if let Some(one_step) = from.offset(0, direction) {
        if one_step.bit() & empty != 0 {
            targets |= one_step.bit();

            let start_rank = side.home_rank() as i8 + direction;
            if from.rank() as i8 == start_rank {
                if let Some(two_step) = one_step.offset(0, direction) {
                    targets |= two_step.bit() & empty;
                }
            }
        }
    }

    let captures = pawn_attacks(side, from);
    targets |= captures & board.occupancy(side.opposite());

    if let Some(ep) = game_state.en_passant_square() {
        targets |= captures & ep.bit();
    }

    targets
}
