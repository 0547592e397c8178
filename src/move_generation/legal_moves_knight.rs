//! Knight destinations.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::moves::leaper_attacks::knight_attacks;

pub fn knight_destinations(game_state: &GameState, from: Square) -> u64 {
    let own = game_state.board().occupancy(game_state.side_to_move());
    knight_attacks(from) & !own
}
