//! Terminal board renderer.
//!
//! Rank 8 is printed at the top, files are labelled on both edges, and the
//! squares of the last move are bracketed so they stand out without color.
//! Squares in an optional destination mask are wrapped in parentheses.

use clap::ValueEnum;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Glyph set used for pieces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PieceStyle {
    #[default]
    Unicode,
    Letters,
}

impl PieceStyle {
    pub fn glyph(self, piece: Piece) -> char {
        match self {
            PieceStyle::Letters => piece.fen_char(),
            PieceStyle::Unicode => piece_to_unicode(piece),
        }
    }
}

/// Render the board for `game_state`, marking `last_move` if given.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(game_state: &GameState, style: PieceStyle, last_move: Option<Move>) -> String {
    render_board_marked(game_state, style, last_move, 0)
}

/// Like [`render_board`], also marking every square set in `destinations`.
/// Last-move brackets win where the two overlap.
pub fn render_board_marked(
    game_state: &GameState,
    style: PieceStyle,
    last_move: Option<Move>,
    destinations: u64,
) -> String {
    const FILES: &str = "   a  b  c  d  e  f  g  h\n";
    let highlighted = last_move.map_or(0u64, |mv| mv.from.bit() | mv.to.bit());

    let mut out = String::with_capacity(400);
    out.push_str(FILES);

    for rank in (0..8u8).rev() {
        let label = char::from(b'1' + rank);
        out.push(label);
        out.push(' ');

        for file in 0..8u8 {
            let square = Square::at(rank * 8 + file);
            let glyph = game_state
                .board()
                .piece_at(square)
                .map_or('.', |piece| style.glyph(piece));

            let (open, close) = if highlighted & square.bit() != 0 {
                ('[', ']')
            } else if destinations & square.bit() != 0 {
                ('(', ')')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(glyph);
            out.push(close);
        }

        out.push(' ');
        out.push(label);
        out.push('\n');
    }

    out.push_str(FILES);
    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
