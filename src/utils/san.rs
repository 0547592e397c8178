//! Standard Algebraic Notation (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
//!
//! SAN only makes sense relative to a position: the parser resolves the
//! text against the legal move set, and the writer disambiguates against it.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_unchecked;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves_unchecked};
use crate::moves::move_descriptions::describe_move;
use crate::utils::long_algebraic::{looks_like_long_algebraic, parse_long_algebraic};

/// Fields read out of a SAN token before it is matched against the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanPattern {
    Castle(CastleSide),
    Piece {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

/// Resolve SAN text to the unique legal move it names.
///
/// Malformed or ambiguous text gives `InvalidNotation`; well-formed text that
/// names no legal move gives `IllegalMove`.
pub fn parse_san(text: &str, game_state: &GameState) -> ChessResult<Move> {
    game_state.validate()?;
    let pattern = parse_pattern(text)?;
    let board = game_state.board();

    let candidates: Vec<Move> = legal_moves_unchecked(game_state)
        .into_iter()
        .filter(|&mv| {
            let Some(description) = describe_move(board, game_state.en_passant_square(), mv)
            else {
                return false;
            };
            match pattern {
                SanPattern::Castle(side) => description.castle == Some(side),
                SanPattern::Piece {
                    kind,
                    from_file,
                    from_rank,
                    to,
                    promotion,
                } => {
                    description.castle.is_none()
                        && description.moved.kind == kind
                        && mv.to == to
                        && mv.promotion == promotion
                        && from_file.map_or(true, |file| mv.from.file() == file)
                        && from_rank.map_or(true, |rank| mv.from.rank() == rank)
                }
            }
        })
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessError::IllegalMove(format!(
            "{} is not legal for {}",
            text.trim(),
            game_state.side_to_move()
        ))),
        _ => Err(ChessError::InvalidNotation(format!(
            "'{}' is ambiguous; add the source file or rank",
            text.trim()
        ))),
    }
}

/// Accept either SAN or long algebraic text.
pub fn parse_move_input(text: &str, game_state: &GameState) -> ChessResult<Move> {
    if looks_like_long_algebraic(text) {
        parse_long_algebraic(text, game_state)
    } else {
        parse_san(text, game_state)
    }
}

/// Format a legal move as SAN, with `+` or `#` when it checks or mates.
pub fn to_san(game_state: &GameState, mv: Move) -> ChessResult<String> {
    game_state.validate()?;
    let legal = legal_moves_unchecked(game_state);
    if !legal.contains(&mv) {
        return Err(ChessError::IllegalMove(format!(
            "{mv} is not a legal move for {}",
            game_state.side_to_move()
        )));
    }

    let board = game_state.board();
    let description = describe_move(board, game_state.en_passant_square(), mv)
        .ok_or_else(|| ChessError::InvalidState(format!("no piece on {}", mv.from)))?;

    let mut san = String::with_capacity(8);
    match description.castle {
        Some(CastleSide::Kingside) => san.push_str("O-O"),
        Some(CastleSide::Queenside) => san.push_str("O-O-O"),
        None => {
            let kind = description.moved.kind;
            if kind == PieceKind::Pawn {
                if description.is_capture() {
                    san.push(file_char(mv.from.file()));
                }
            } else {
                san.push(kind.letter().to_ascii_uppercase());
                push_disambiguation(&mut san, board, &legal, mv, kind);
            }

            if description.is_capture() {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());

            if let Some(promotion) = mv.promotion {
                san.push('=');
                san.push(promotion.letter().to_ascii_uppercase());
            }
        }
    }

    let next = apply_unchecked(game_state, mv)?;
    if king_in_check(next.board(), next.side_to_move()) {
        san.push(if has_legal_move(&next) { '+' } else { '#' });
    }

    Ok(san)
}

/// SAN for every legal move, in generation order.
pub fn legal_moves_san(game_state: &GameState) -> ChessResult<Vec<String>> {
    game_state.validate()?;
    legal_moves_unchecked(game_state)
        .into_iter()
        .map(|mv| to_san(game_state, mv))
        .collect()
}

// File first, then rank, then both: the shortest prefix that singles the
// mover out among same-kind pieces reaching the same square.
fn push_disambiguation(
    san: &mut String,
    board: &Board,
    legal: &[Move],
    mv: Move,
    kind: PieceKind,
) {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && board.piece_at(other.from).is_some_and(|p| p.kind == kind)
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return;
    }

    let shares_file = rivals.iter().any(|sq| sq.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|sq| sq.rank() == mv.from.rank());

    if !shares_file {
        san.push(file_char(mv.from.file()));
    } else if !shares_rank {
        san.push(rank_char(mv.from.rank()));
    } else {
        san.push(file_char(mv.from.file()));
        san.push(rank_char(mv.from.rank()));
    }
}

fn parse_pattern(text: &str) -> ChessResult<SanPattern> {
    let trimmed = text
        .trim()
        .trim_end_matches(|ch| matches!(ch, '+' | '#' | '!' | '?'));
    let invalid = || ChessError::InvalidNotation(format!("'{}' is not valid SAN", text.trim()));

    match trimmed {
        "O-O" | "0-0" | "o-o" => return Ok(SanPattern::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" | "o-o-o" => return Ok(SanPattern::Castle(CastleSide::Queenside)),
        _ => {}
    }

    if !trimmed.is_ascii() {
        return Err(invalid());
    }
    let mut body = trimmed.as_bytes();

    // Piece letters are uppercase; a lowercase b is a pawn file.
    let kind = match body.first() {
        Some(b'N') => PieceKind::Knight,
        Some(b'B') => PieceKind::Bishop,
        Some(b'R') => PieceKind::Rook,
        Some(b'Q') => PieceKind::Queen,
        Some(b'K') => PieceKind::King,
        Some(_) => PieceKind::Pawn,
        None => return Err(invalid()),
    };
    if kind != PieceKind::Pawn {
        body = &body[1..];
    }

    let mut promotion = None;
    if let [rest @ .., letter] = body {
        if matches!(*letter, b'N' | b'B' | b'R' | b'Q' | b'n' | b'b' | b'r' | b'q') {
            let rest = rest.strip_suffix(b"=").unwrap_or(rest);
            if rest.last().is_some_and(u8::is_ascii_digit) {
                promotion = PieceKind::from_letter(char::from(*letter));
                body = rest;
            }
        }
    }
    if promotion.is_some() && kind != PieceKind::Pawn {
        return Err(invalid());
    }

    let [prefix @ .., file, rank] = body else {
        return Err(invalid());
    };
    let to = Square::new(
        file_index(*file).ok_or_else(invalid)?,
        rank_index(*rank).ok_or_else(invalid)?,
    )?;

    let prefix = prefix.strip_suffix(b"x").unwrap_or(prefix);
    let (from_file, from_rank) = match prefix {
        [] => (None, None),
        [ch] => match (file_index(*ch), rank_index(*ch)) {
            (Some(file), _) => (Some(file), None),
            (_, Some(rank)) => (None, Some(rank)),
            _ => return Err(invalid()),
        },
        [file, rank] => (
            Some(file_index(*file).ok_or_else(invalid)?),
            Some(rank_index(*rank).ok_or_else(invalid)?),
        ),
        _ => return Err(invalid()),
    };

    Ok(SanPattern::Piece {
        kind,
        from_file,
        from_rank,
        to,
        promotion,
    })
}

fn file_index(ch: u8) -> Option<u8> {
    (b'a'..=b'h').contains(&ch).then(|| ch - b'a')
}

fn rank_index(ch: u8) -> Option<u8> {
    (b'1'..=b'8').contains(&ch).then(|| ch - b'1')
}

fn file_char(file: u8) -> char {
    char::from(b'a' + file)
}

fn rank_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

#[cfg(test)]
mod tests {
    use super::{legal_moves_san, parse_move_input, parse_san, to_san};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{Move, PieceKind, Square};
    use crate::game_state::game_state::GameState;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn parses_common_opening_moves() {
        let start = GameState::new_game();
        assert_eq!(parse_san("e4", &start), Ok(Move::new(sq("e2"), sq("e4"))));
        assert_eq!(parse_san("Nf3", &start), Ok(Move::new(sq("g1"), sq("f3"))));
        assert_eq!(parse_san("Nf3!?", &start), Ok(Move::new(sq("g1"), sq("f3"))));
        assert!(matches!(parse_san("e5", &start), Err(ChessError::IllegalMove(_))));
        assert!(matches!(parse_san("Nf4", &start), Err(ChessError::IllegalMove(_))));
        assert!(matches!(parse_san("hello", &start), Err(ChessError::InvalidNotation(_))));
        assert!(matches!(parse_san("", &start), Err(ChessError::InvalidNotation(_))));
    }

    #[test]
    fn pawn_captures_and_en_passant() {
        let position = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(parse_san("exd6", &position), Ok(Move::new(sq("e5"), sq("d6"))));
        assert_eq!(
            to_san(&position, Move::new(sq("e5"), sq("d6"))).as_deref(),
            Ok("exd6")
        );
    }

    #[test]
    fn castling_in_both_spellings() {
        let position = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(parse_san("O-O", &position), Ok(Move::new(sq("e1"), sq("g1"))));
        assert_eq!(parse_san("0-0-0", &position), Ok(Move::new(sq("e1"), sq("c1"))));
        assert_eq!(to_san(&position, Move::new(sq("e1"), sq("c1"))).as_deref(), Ok("O-O-O"));

        let no_rights = game("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(matches!(parse_san("O-O", &no_rights), Err(ChessError::IllegalMove(_))));
    }

    #[test]
    fn promotion_with_and_without_equals() {
        let position = game("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
        let queen = Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Queen);
        assert_eq!(parse_san("a8=Q", &position), Ok(queen));
        assert_eq!(parse_san("a8Q", &position), Ok(queen));
        assert_eq!(
            parse_san("a8=N", &position),
            Ok(Move::with_promotion(sq("a7"), sq("a8"), PieceKind::Knight))
        );
        assert!(matches!(parse_san("a8", &position), Err(ChessError::IllegalMove(_))));
        assert_eq!(to_san(&position, queen).as_deref(), Ok("a8=Q"));
    }

    #[test]
    fn disambiguation_by_file_rank_and_square() {
        // Knights on b1 and f1 both reach d2; rooks on a1 and a5 both reach a3.
        let position = game("4k3/8/8/R7/8/8/8/RN2KN2 w - - 0 1");
        assert!(matches!(parse_san("Nd2", &position), Err(ChessError::InvalidNotation(_))));
        assert_eq!(parse_san("Nbd2", &position), Ok(Move::new(sq("b1"), sq("d2"))));
        assert_eq!(to_san(&position, Move::new(sq("f1"), sq("d2"))).as_deref(), Ok("Nfd2"));
        assert_eq!(parse_san("R5a3", &position), Ok(Move::new(sq("a5"), sq("a3"))));
        assert_eq!(to_san(&position, Move::new(sq("a1"), sq("a3"))).as_deref(), Ok("R1a3"));

        // Queens on a1, a3 and c1 all reach b2: only the full square works.
        let queens = game("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1");
        assert_eq!(to_san(&queens, Move::new(sq("a1"), sq("b2"))).as_deref(), Ok("Qa1b2"));
        assert_eq!(parse_san("Qa1b2", &queens), Ok(Move::new(sq("a1"), sq("b2"))));
    }

    #[test]
    fn check_and_mate_suffixes() {
        let position = game("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(to_san(&position, Move::new(sq("a1"), sq("a8"))).as_deref(), Ok("Ra8#"));
        assert_eq!(parse_san("Ra8#", &position), Ok(Move::new(sq("a1"), sq("a8"))));

        let check = game("6k1/5pp1/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(to_san(&check, Move::new(sq("a1"), sq("a8"))).as_deref(), Ok("Ra8+"));
    }

    #[test]
    fn input_routing_accepts_both_notations() {
        let start = GameState::new_game();
        assert_eq!(parse_move_input("g1f3", &start), parse_move_input("Nf3", &start));
        assert_eq!(parse_move_input(" e4 ", &start), Ok(Move::new(sq("e2"), sq("e4"))));
    }

    #[test]
    fn every_legal_move_has_san_that_parses_back() {
        let position = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let sans = legal_moves_san(&position).expect("valid state");
        assert_eq!(sans.len(), 48);
        for san in sans {
            assert!(parse_san(&san, &position).is_ok(), "{san}");
        }
    }
}
