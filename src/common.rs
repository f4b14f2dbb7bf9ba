//! Shared primitives: sides and board coordinates.

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;

/// One of the two players. Serializes as `"white"`/`"black"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other player.
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board coordinate. Row 0 is the black home rank, as served on the wire.
///
/// Every `Square` built through [`Square::checked`] or the in-crate iterators
/// has both fields in [0,7]; untrusted coordinates must go through `checked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Construct without validation, for coordinates already known in range.
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// Bounds-checked construction for wire or user input.
    pub fn checked(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

impl From<Square> for [u8; 2] {
    fn from(sq: Square) -> Self {
        [sq.row, sq.col]
    }
}

impl TryFrom<[u8; 2]> for Square {
    type Error = ();

    fn try_from(raw: [u8; 2]) -> Result<Self, ()> {
        Square::checked(raw[0], raw[1]).ok_or(())
    }
}

impl core::fmt::Display for Square {
    /// Algebraic notation; row 0 is rank 8.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE as u8 - self.row;
        write!(f, "{}{}", file, rank)
    }
}
