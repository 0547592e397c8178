//! FEN-to-GameState parser.
//!
//! Only the syntax is checked here; `GameState::from_fen` additionally
//! validates that the position is possible.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| fen_error("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| fen_error("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(&format!("invalid halfmove clock '{halfmove_part}'")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(&format!("invalid fullmove number '{fullmove_part}'")))?;

    Ok(GameState::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
    ))
}

fn fen_error(message: &str) -> ChessError {
    ChessError::InvalidFen(message.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) || previous_was_digit {
                    return Err(fen_error(&format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                previous_was_digit = true;
            } else {
                let piece = Piece::from_fen_char(ch)
                    .ok_or_else(|| fen_error(&format!("invalid piece character '{ch}'")))?;
                if file >= 8 {
                    return Err(fen_error(&format!("rank {} has too many files", rank + 1)));
                }
                board.put(Square::at(rank * 8 + file), piece);
                file += 1;
                previous_was_digit = false;
            }

            if file > 8 {
                return Err(fen_error(&format!("rank {} has too many files", rank + 1)));
            }
        }

        if file != 8 {
            return Err(fen_error(&format!("rank {} does not sum to 8 files", rank + 1)));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(fen_error(&format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(fen_error(&format!("invalid castling character '{ch}'"))),
        };
        rights.insert(color, side);
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|err| fen_error(&format!("en-passant field: {err}")))
}
