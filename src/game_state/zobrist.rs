//! Zobrist position signatures for repetition detection.
//!
//! Keys are drawn once from a fixed-seed generator so signatures are stable
//! within a process, which keeps tests and debugging deterministic.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::{squares, Board};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::play_on_board;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::moves::leaper_attacks::pawn_attacks;

/// Compact identity of a position: board, side to move, castling rights and
/// any capturable en-passant file.
pub type PositionSignature = u64;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for key in piece_square.iter_mut().flatten().flatten() {
        *key = rng.next_u64();
    }

    let black_to_move = rng.next_u64();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

/// Compute the signature of a position from scratch.
///
/// The en-passant file only contributes when a pawn of the side to move
/// can legally capture onto the target square; otherwise two positions
/// that offer identical moves would compare unequal.
pub fn position_signature(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
) -> PositionSignature {
    let tables = tables();
    let mut key = 0u64;

    for color in Color::ALL {
        for kind in PieceKind::ALL {
            for square in squares(board.pieces(color, kind)) {
                key ^= tables.piece_square[color.index()][kind.index()][square.index()];
            }
        }
    }

    if side_to_move == Color::Black {
        key ^= tables.black_to_move;
    }

    key ^= tables.castling[castling_rights.bits() as usize];

    if let Some(target) = en_passant_square {
        if has_legal_en_passant(board, side_to_move, target) {
            key ^= tables.en_passant_file[target.file() as usize];
        }
    }

    key
}

/// True when some pawn of `side_to_move` can take on `target` without
/// leaving its own king attacked.
fn has_legal_en_passant(board: &Board, side_to_move: Color, target: Square) -> bool {
    let capturers =
        pawn_attacks(side_to_move.opposite(), target) & board.pieces(side_to_move, PieceKind::Pawn);

    squares(capturers).any(|from| {
        play_on_board(board, Some(target), Move::new(from, target))
            .is_some_and(|(next, _)| !king_in_check(&next, side_to_move))
    })
}
