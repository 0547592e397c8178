//! Terminal-condition detection: checkmate, stalemate and the draw rules.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    /// True when no further moves should be played.
    pub fn is_game_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByRepetition
                | GameStatus::DrawByFiftyMove
                | GameStatus::DrawByInsufficientMaterial
        )
    }
}

/// Classify the position for the side to move.
///
/// When several conditions hold at once the first of checkmate, stalemate,
/// insufficient material, repetition, fifty-move rule, check wins; a mate
/// delivered on the hundredth half-move is still a mate.
pub fn game_status(game_state: &GameState) -> ChessResult<GameStatus> {
    game_state.validate()?;

    let in_check = king_in_check(game_state.board(), game_state.side_to_move());
    if !has_legal_move(game_state) {
        return Ok(if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        });
    }

    if is_insufficient_material(game_state.board()) {
        return Ok(GameStatus::DrawByInsufficientMaterial);
    }
    if game_state.repetition_count() >= REPETITION_DRAW_COUNT {
        return Ok(GameStatus::DrawByRepetition);
    }
    if game_state.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
        return Ok(GameStatus::DrawByFiftyMove);
    }

    Ok(if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    })
}

/// Neither side can ever deliver mate: bare kings, a single minor piece, or
/// only bishops that all stand on squares of one color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawn = Color::ALL.iter().any(|&color| {
        board.pieces(color, PieceKind::Pawn)
            | board.pieces(color, PieceKind::Rook)
            | board.pieces(color, PieceKind::Queen)
            != 0
    });
    if heavy_or_pawn {
        return false;
    }

    let knights: u32 = Color::ALL
        .iter()
        .map(|&color| board.count(color, PieceKind::Knight))
        .sum();
    let bishops = Color::ALL
        .iter()
        .fold(0u64, |acc, &color| acc | board.pieces(color, PieceKind::Bishop));

    if knights + bishops.count_ones() <= 1 {
        return true;
    }

    knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & !LIGHT_SQUARES == 0)
}
