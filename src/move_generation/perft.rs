//! Perft: leaf-node counting over the legal move tree.
//!
//! Reference counts for well-known positions pin down move generation; any
//! bug in castling, en passant, promotion or pin handling shows up as a
//! mismatch at some depth.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_unchecked;
use crate::move_generation::legal_move_checks::king_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves_unchecked};
use crate::moves::move_descriptions::describe_move;

/// Leaf statistics, in the layout of the usual perft tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf nodes `depth` plies below `game_state`.
pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<u64> {
    game_state.validate()?;
    Ok(count_nodes(game_state, depth))
}

/// Like [`perft`], but also classifies the moves that reach the leaves.
pub fn perft_detailed(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    game_state.validate()?;
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    detailed_recurse(game_state, depth, &mut total)?;
    Ok(total)
}

/// Node count below each root move, for bisecting a mismatch.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    game_state.validate()?;
    if depth == 0 {
        return Ok(Vec::new());
    }

    legal_moves_unchecked(game_state)
        .into_iter()
        .map(|mv| {
            let child = apply_unchecked(game_state, mv)?;
            Ok((mv, count_nodes(&child, depth - 1)))
        })
        .collect()
}

fn count_nodes(game_state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves_unchecked(game_state);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .filter_map(|mv| apply_unchecked(game_state, mv).ok())
        .map(|child| count_nodes(&child, depth - 1))
        .sum()
}

fn detailed_recurse(game_state: &GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for mv in legal_moves_unchecked(game_state) {
        let child = apply_unchecked(game_state, mv)?;

        if depth > 1 {
            detailed_recurse(&child, depth - 1, counts)?;
            continue;
        }

        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
        if let Some(description) =
            describe_move(game_state.board(), game_state.en_passant_square(), mv)
        {
            leaf.captures = u64::from(description.is_capture());
            leaf.en_passant = u64::from(description.is_en_passant);
            leaf.castles = u64::from(description.castle.is_some());
            leaf.promotions = u64::from(description.promotion.is_some());
        }
        if king_in_check(child.board(), child.side_to_move()) {
            leaf.checks = 1;
            leaf.checkmates = u64::from(!has_legal_move(&child));
        }
        counts.merge(leaf);
    }

    Ok(())
}
