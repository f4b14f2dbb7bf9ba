//! Piece types and the glyph encoding used on the wire.
//!
//! The server exchanges boards as grids of Unicode chess glyphs, one string
//! per cell with `""` for an empty square. The glyph determines both kind
//! and side, so a cell maps to exactly one color.

use crate::common::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece { side, kind }
    }

    /// The wire glyph for this piece.
    pub fn glyph(self) -> &'static str {
        match (self.side, self.kind) {
            (Side::White, PieceKind::Pawn) => "♙",
            (Side::White, PieceKind::Rook) => "♖",
            (Side::White, PieceKind::Knight) => "♘",
            (Side::White, PieceKind::Bishop) => "♗",
            (Side::White, PieceKind::Queen) => "♕",
            (Side::White, PieceKind::King) => "♔",
            (Side::Black, PieceKind::Pawn) => "♟",
            (Side::Black, PieceKind::Rook) => "♜",
            (Side::Black, PieceKind::Knight) => "♞",
            (Side::Black, PieceKind::Bishop) => "♝",
            (Side::Black, PieceKind::Queen) => "♛",
            (Side::Black, PieceKind::King) => "♚",
        }
    }

    /// Decode a wire glyph. `None` for anything that is not one of the
    /// twelve piece glyphs; the empty cell is handled by the grid codec.
    pub fn from_glyph(glyph: &str) -> Option<Piece> {
        let piece = match glyph {
            "♙" => Piece::new(Side::White, PieceKind::Pawn),
            "♖" => Piece::new(Side::White, PieceKind::Rook),
            "♘" => Piece::new(Side::White, PieceKind::Knight),
            "♗" => Piece::new(Side::White, PieceKind::Bishop),
            "♕" => Piece::new(Side::White, PieceKind::Queen),
            "♔" => Piece::new(Side::White, PieceKind::King),
            "♟" => Piece::new(Side::Black, PieceKind::Pawn),
            "♜" => Piece::new(Side::Black, PieceKind::Rook),
            "♞" => Piece::new(Side::Black, PieceKind::Knight),
            "♝" => Piece::new(Side::Black, PieceKind::Bishop),
            "♛" => Piece::new(Side::Black, PieceKind::Queen),
            "♚" => Piece::new(Side::Black, PieceKind::King),
            _ => return None,
        };
        Some(piece)
    }
}

impl core::fmt::Display for Piece {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.glyph())
    }
}
