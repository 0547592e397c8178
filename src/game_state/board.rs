//! Piece placement stored as one bitboard per `(color, kind)`.
//!
//! Occupancy caches are kept in sync by every mutating method, so move
//! generation can read them without recomputing.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bitboard of every piece of `kind` owned by `color`.
    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy_all
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(color, kind))
    }

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        let mask = square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Clear `square`, returning the piece that stood there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        let mask = !square.bit();
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(piece)
    }

    /// Square of `color`'s king; the first one found if the board is corrupt.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        squares(self.pieces(color, PieceKind::King)).next()
    }

    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.pieces(color, kind).count_ones()
    }

    /// Every occupied square with its piece, a1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares(self.occupancy_all).filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }
}

/// Iterate the set bits of a bitboard as squares, lowest index first.
#[inline]
pub fn squares(bitboard: u64) -> SquareIter {
    SquareIter(bitboard)
}

pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = Square::at(self.0.trailing_zeros() as u8);
        self.0 &= self.0 - 1;
        Some(square)
    }
}
