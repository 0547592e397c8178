//! Queen destinations: the union of rook and bishop rays.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::moves::slider_attacks::queen_attacks;

pub fn queen_destinations(game_state: &GameState, from: Square) -> u64 {
    let board = game_state.board();
    queen_attacks(from, board.occupied()) & !board.occupancy(game_state.side_to_move())
}
