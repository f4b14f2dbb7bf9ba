//! The client's board mirror.
//!
//! The server holds the authoritative board; this is a cached copy,
//! reconciled on every poll and every accepted move. Mutation goes through
//! exactly two operations, [`Board::apply_move`] and [`Board::replace`],
//! neither of which checks legality — the server already did.

use crate::common::{Side, Square};
use crate::config::{initial_grid, BOARD_SIZE};
use crate::piece::Piece;

/// Cell matrix, row-major, row 0 at the black home rank.
pub type Grid = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// A decoded authoritative state as fetched from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Grid,
    pub turn: Side,
}

/// Stable identity of a piece, independent of its position.
///
/// Ids let the presentation layer track a piece across moves instead of
/// resolving it by coordinates captured at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

type IdGrid = [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE];

pub struct Board {
    grid: Grid,
    turn: Side,
    ids: IdGrid,
}

impl Board {
    /// A board in the standard starting position, white to move.
    pub fn new() -> Self {
        Self::from_snapshot(&Snapshot {
            grid: initial_grid(),
            turn: Side::White,
        })
    }

    /// Build a mirror from an authoritative snapshot, assigning fresh piece
    /// ids in scan order.
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        let mut board = Board {
            grid: snap.grid,
            turn: snap.turn,
            ids: [[None; BOARD_SIZE]; BOARD_SIZE],
        };
        board.reindex();
        board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    pub fn occupant(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize]
    }

    /// The stable id of the piece on `sq`, if occupied.
    pub fn piece_id_at(&self, sq: Square) -> Option<PieceId> {
        self.ids[sq.row as usize][sq.col as usize]
    }

    /// Overwrite the destination with the origin's occupant and clear the
    /// origin. No legality check. Returns whether the destination was
    /// occupied beforehand.
    ///
    /// The moving piece keeps its id at the new square; a captured piece's
    /// id is dropped.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        let (fr, fc) = (from.row as usize, from.col as usize);
        let (tr, tc) = (to.row as usize, to.col as usize);
        let captured = self.grid[tr][tc].is_some();
        self.grid[tr][tc] = self.grid[fr][fc].take();
        self.ids[tr][tc] = self.ids[fr][fc].take();
        captured
    }

    /// Full snapshot swap, used when diffing cannot explain the difference.
    /// Piece ids are reassigned, as the full re-render rebuilds identity.
    pub fn replace(&mut self, snap: &Snapshot) {
        self.grid = snap.grid;
        self.turn = snap.turn;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.ids = [[None; BOARD_SIZE]; BOARD_SIZE];
        let mut next = 0u8;
        for sq in Square::all() {
            if self.grid[sq.row as usize][sq.col as usize].is_some() {
                self.ids[sq.row as usize][sq.col as usize] = Some(PieceId(next));
                next += 1;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
