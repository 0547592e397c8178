//! Bishop destinations: diagonal rays up to and including the first
//! occupied square, minus friendly pieces.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::moves::slider_attacks::bishop_attacks;

pub fn bishop_destinations(game_state: &GameState, from: Square) -> u64 {
    let board = game_state.board();
    bishop_attacks(from, board.occupied()) & !board.occupancy(game_state.side_to_move())
}
