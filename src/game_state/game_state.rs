//! The authoritative game state.
//!
//! `GameState` holds the board, turn and rights flags, clocks, and the
//! signature history used for repetition detection. Fields are crate-private:
//! outside code reads them through accessors and changes a state only by
//! applying legal moves, which keeps the history consistent with the board.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castling_geometry, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::{position_signature, PositionSignature};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    // Signatures of every position since the last irreversible move,
    // ending with the current one.
    pub(crate) signature_history: Vec<PositionSignature>,
}

impl GameState {
    /// Standard starting position.
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Build a state from FEN. The position must be reachable in principle:
    /// one king per side, no pawns on the back ranks, castling rights backed
    /// by unmoved pieces, a plausible en-passant square, and the side that
    /// just moved not left in check.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let state = parse_fen(fen)?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let signature =
            position_signature(&board, side_to_move, castling_rights, en_passant_square);
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            signature_history: vec![signature],
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Signature of the current position.
    pub fn signature(&self) -> PositionSignature {
        self.signature_history.last().copied().unwrap_or_else(|| {
            position_signature(
                &self.board,
                self.side_to_move,
                self.castling_rights,
                self.en_passant_square,
            )
        })
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let current = self.signature();
        self.signature_history
            .iter()
            .filter(|&&sig| sig == current)
            .count()
            .max(1)
    }

    /// Reject states no legal game can produce.
    pub fn validate(&self) -> ChessResult<()> {
        for color in Color::ALL {
            let kings = self.board.count(color, PieceKind::King);
            if kings != 1 {
                return Err(ChessError::InvalidState(format!(
                    "{color} has {kings} kings, expected exactly one"
                )));
            }
        }

        let back_ranks = 0xFF00_0000_0000_00FFu64;
        for color in Color::ALL {
            if self.board.pieces(color, PieceKind::Pawn) & back_ranks != 0 {
                return Err(ChessError::InvalidState(format!(
                    "{color} has a pawn on the first or last rank"
                )));
            }
        }

        for color in Color::ALL {
            for side in CastleSide::BOTH {
                if !self.castling_rights.has(color, side) {
                    continue;
                }
                let geometry = castling_geometry(color, side);
                let king = Piece::new(color, PieceKind::King);
                let rook = Piece::new(color, PieceKind::Rook);
                if self.board.piece_at(geometry.king_from) != Some(king)
                    || self.board.piece_at(geometry.rook_from) != Some(rook)
                {
                    return Err(ChessError::InvalidState(format!(
                        "{color} holds {side:?} castling rights without king and rook on their home squares"
                    )));
                }
            }
        }

        if let Some(target) = self.en_passant_square {
            self.validate_en_passant(target)?;
        }

        let defender = self.side_to_move.opposite();
        if let Some(king) = self.board.king_square(defender) {
            if is_square_attacked(&self.board, king, self.side_to_move) {
                return Err(ChessError::InvalidState(format!(
                    "{defender} is in check but it is {}'s turn",
                    self.side_to_move
                )));
            }
        }

        Ok(())
    }

    fn validate_en_passant(&self, target: Square) -> ChessResult<()> {
        let mover = self.side_to_move.opposite();
        let expected_rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        let direction = mover.pawn_direction();
        let pushed_pawn = target.offset(0, direction);
        let origin = target.offset(0, -direction);

        let plausible = target.rank() == expected_rank
            && self.board.piece_at(target).is_none()
            && origin.is_some_and(|sq| self.board.piece_at(sq).is_none())
            && pushed_pawn.and_then(|sq| self.board.piece_at(sq))
                == Some(Piece::new(mover, PieceKind::Pawn));

        if plausible {
            Ok(())
        } else {
            Err(ChessError::InvalidState(format!(
                "en-passant square {target} does not follow a double pawn push"
            )))
        }
    }
}
