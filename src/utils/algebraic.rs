//! Square conversions for algebraic coordinates (`"e4"`).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example: "e4") to a square.
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(format!(
            "'{text}' is not a two-character coordinate"
        )));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidSquare(format!(
            "'{text}' has file outside a-h"
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(format!(
            "'{text}' has rank outside 1-8"
        )));
    }

    Square::new(file - b'a', rank - b'1')
}

/// Convert a square to its algebraic coordinate (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file());
    let rank_char = char::from(b'1' + square.rank());
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::errors::ChessError;

    #[test]
    fn corner_squares_convert_both_ways() {
        let a1 = algebraic_to_square("a1").expect("a1 should parse");
        let h8 = algebraic_to_square("h8").expect("h8 should parse");
        assert_eq!(a1.index(), 0);
        assert_eq!(h8.index(), 63);
        assert_eq!(square_to_algebraic(h8), "h8");
    }

    #[test]
    fn malformed_coordinates_are_invalid_squares() {
        for text in ["", "e", "e9", "i1", "e44", "4e"] {
            assert!(
                matches!(algebraic_to_square(text), Err(ChessError::InvalidSquare(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn uppercase_file_is_accepted() {
        let e4 = algebraic_to_square("E4").expect("E4 should parse");
        assert_eq!(square_to_algebraic(e4), "e4");
    }
}
