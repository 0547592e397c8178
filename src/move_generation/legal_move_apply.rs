//! Move application.
//!
//! `apply_move` is the checked entry point: it only accepts members of the
//! legal move set and never touches the input state, so a rejected move
//! leaves the caller's game exactly as it was.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::zobrist::position_signature;
use crate::move_generation::legal_move_generator::legal_moves_unchecked;
use crate::moves::move_descriptions::{describe_move, MoveDescription};

/// Apply a legal move, returning the successor state.
pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    game_state.validate()?;

    if !legal_moves_unchecked(game_state).contains(&mv) {
        return Err(ChessError::IllegalMove(format!(
            "{mv} is not a legal move for {}",
            game_state.side_to_move()
        )));
    }

    let next = apply_unchecked(game_state, mv)?;
    debug!(mv = %mv, fen = %next.to_fen(), "applied move");
    Ok(next)
}

/// Relocate pieces for `mv` on a copy of `board`: captures (including en
/// passant), promotion, and the castling rook.
pub(crate) fn play_on_board(
    board: &Board,
    en_passant_square: Option<Square>,
    mv: Move,
) -> Option<(Board, MoveDescription)> {
    let description = describe_move(board, en_passant_square, mv)?;
    let mut next = board.clone();

    if let Some(capture_square) = description.capture_square {
        next.remove(capture_square);
    }

    next.remove(mv.from);
    let placed = Piece::new(
        description.moved.color,
        description.promotion.unwrap_or(description.moved.kind),
    );
    next.put(mv.to, placed);

    if let Some(side) = description.castle {
        let geometry = castling_geometry(description.moved.color, side);
        if let Some(rook) = next.remove(geometry.rook_from) {
            next.put(geometry.rook_to, rook);
        }
    }

    Some((next, description))
}

/// Build the successor state for a move already known to be pseudo-legal.
pub(crate) fn apply_unchecked(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let (board, description) = play_on_board(&game_state.board, game_state.en_passant_square, mv)
        .ok_or_else(|| ChessError::InvalidState(format!("no piece on {}", mv.from)))?;

    let mover = game_state.side_to_move;
    let castling_rights = updated_castling_rights(game_state.castling_rights, &description, mv);

    let en_passant_square = if description.is_double_pawn_push {
        Square::from_index(((mv.from.index() + mv.to.index()) / 2) as u8)
    } else {
        None
    };

    let halfmove_clock = if description.is_irreversible() {
        0
    } else {
        game_state.halfmove_clock.saturating_add(1)
    };
    let fullmove_number = if mover == Color::Black {
        game_state.fullmove_number.saturating_add(1)
    } else {
        game_state.fullmove_number
    };

    let side_to_move = mover.opposite();
    let signature = position_signature(&board, side_to_move, castling_rights, en_passant_square);

    // Nothing before a pawn move or capture can occur again.
    let mut signature_history = if description.is_irreversible() {
        Vec::with_capacity(16)
    } else {
        game_state.signature_history.clone()
    };
    signature_history.push(signature);

    Ok(GameState {
        board,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
        signature_history,
    })
}

fn updated_castling_rights(
    rights: CastlingRights,
    description: &MoveDescription,
    mv: Move,
) -> CastlingRights {
    let mut rights = rights;

    if description.moved.kind == PieceKind::King {
        rights.remove_color(description.moved.color);
    }

    // A rook leaving its corner, or anything landing on it, ends that right.
    for color in Color::ALL {
        for side in CastleSide::BOTH {
            let corner = castling_geometry(color, side).rook_from;
            if mv.from == corner || mv.to == corner {
                rights.remove(color, side);
            }
        }
    }

    rights
}
