//! Ray-traced attack sets for bishops, rooks and queens.
//!
//! Each ray includes the first occupied square it meets (a capture target or
//! a friendly blocker; callers mask out their own pieces).

use crate::game_state::chess_types::Square;

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(origin: Square, d_file: i8, d_rank: i8, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut cursor = origin.offset(d_file, d_rank);

    while let Some(target) = cursor {
        attacks |= target.bit();
        if occupancy & target.bit() != 0 {
            break;
        }
        cursor = target.offset(d_file, d_rank);
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, queen_attacks, rook_attacks};
    use crate::game_state::chess_types::Square;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn empty_board_ray_lengths() {
        assert_eq!(rook_attacks(sq("d4"), 0).count_ones(), 14);
        assert_eq!(bishop_attacks(sq("d4"), 0).count_ones(), 13);
        assert_eq!(queen_attacks(sq("a1"), 0).count_ones(), 21);
    }

    #[test]
    fn rook_blocker_stops_ray_but_is_included() {
        let attacks = rook_attacks(sq("a1"), sq("a4").bit());
        assert_ne!(attacks & sq("a4").bit(), 0);
        assert_eq!(attacks & sq("a5").bit(), 0);
        assert_ne!(attacks & sq("h1").bit(), 0);
    }

    #[test]
    fn bishop_blocker_on_diagonal() {
        let attacks = bishop_attacks(sq("c1"), sq("e3").bit());
        assert_ne!(attacks & sq("d2").bit(), 0);
        assert_ne!(attacks & sq("e3").bit(), 0);
        assert_eq!(attacks & sq("f4").bit(), 0);
        assert_ne!(attacks & sq("a3").bit(), 0);
    }
}
