//! Rook destinations along ranks and files.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::moves::slider_attacks::rook_attacks;

pub fn rook_destinations(game_state: &GameState, from: Square) -> u64 {
    let board = game_state.board();
    rook_attacks(from, board.occupied()) & !board.occupancy(game_state.side_to_move())
}
