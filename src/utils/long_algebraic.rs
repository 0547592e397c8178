//! Long algebraic move text (`e2e4`, `e7e8q`), as typed by players and as
//! returned by UCI engines in `bestmove`.
//!
//! Parsing checks the text against the position (a piece of the side to move
//! on the source square, promotion only by a pawn reaching the last rank) but
//! not full legality; `apply_move` remains the authority on that.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

/// Parse `text` into a move for the side to move in `game_state`.
pub fn parse_long_algebraic(text: &str, game_state: &GameState) -> ChessResult<Move> {
    let text = text.trim();
    if !(text.len() == 4 || text.len() == 5) || !text.is_ascii() {
        return Err(ChessError::InvalidNotation(format!(
            "'{text}' is not long algebraic (expected e.g. e2e4 or e7e8q)"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let side = game_state.side_to_move();
    let piece = game_state
        .board()
        .piece_at(from)
        .filter(|piece| piece.color == side)
        .ok_or_else(|| ChessError::IllegalMove(format!("no {side} piece on {from}")))?;

    let reaches_last_rank = piece.kind == PieceKind::Pawn && to.rank() == side.promotion_rank();

    let promotion = match text[4..].chars().next() {
        None if reaches_last_rank => {
            return Err(ChessError::InvalidNotation(format!(
                "'{text}' needs a promotion piece (q, r, b or n)"
            )));
        }
        None => None,
        Some(ch) => {
            let kind = PieceKind::from_letter(ch)
                .filter(|kind| kind.is_promotion_target())
                .ok_or_else(|| {
                    ChessError::InvalidNotation(format!("'{ch}' is not a promotion piece"))
                })?;
            if !reaches_last_rank {
                return Err(ChessError::IllegalMove(format!(
                    "{text}: only a pawn reaching the last rank may promote"
                )));
            }
            Some(kind)
        }
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

/// Cheap shape test used to route player input between the notations.
pub fn looks_like_long_algebraic(text: &str) -> bool {
    let bytes = text.trim().as_bytes();
    let is_square = |file: u8, rank: u8| {
        (b'a'..=b'h').contains(&file.to_ascii_lowercase()) && (b'1'..=b'8').contains(&rank)
    };
    matches!(bytes.len(), 4 | 5) && is_square(bytes[0], bytes[1]) && is_square(bytes[2], bytes[3])
}

#[cfg(test)]
mod tests {
    use super::{looks_like_long_algebraic, parse_long_algebraic};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;

    #[test]
    fn parses_plain_move_and_display_matches() {
        let game = GameState::new_game();
        let mv = parse_long_algebraic("e2e4", &game).expect("e2e4 should parse");
        assert_eq!(mv.to_string(), "e2e4");
        assert!(apply_move(&game, mv).is_ok());
    }

    #[test]
    fn promotion_suffix_is_required_on_last_rank() {
        let game = GameState::from_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("a7a8n", &game).expect("a7a8n should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert!(matches!(
            parse_long_algebraic("a7a8", &game),
            Err(ChessError::InvalidNotation(_))
        ));
        assert!(matches!(
            parse_long_algebraic("a7a8k", &game),
            Err(ChessError::InvalidNotation(_))
        ));
    }

    #[test]
    fn rejects_bad_squares_and_foreign_pieces() {
        let game = GameState::new_game();
        assert!(matches!(
            parse_long_algebraic("e9e4", &game),
            Err(ChessError::InvalidSquare(_))
        ));
        assert!(matches!(
            parse_long_algebraic("e7e5", &game),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            parse_long_algebraic("g1f3q", &game),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            parse_long_algebraic("castle", &game),
            Err(ChessError::InvalidNotation(_))
        ));
    }

    #[test]
    fn shape_test_separates_notations() {
        assert!(looks_like_long_algebraic("e2e4"));
        assert!(looks_like_long_algebraic("b7b8q"));
        assert!(!looks_like_long_algebraic("Nf3"));
        assert!(!looks_like_long_algebraic("exd5"));
        assert!(!looks_like_long_algebraic("O-O-O"));
    }
}
