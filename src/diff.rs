//! Move inference between two board snapshots.
//!
//! The server does not push moves; the client learns about the opponent's
//! move by comparing its cached grid against a freshly polled one. The
//! differ recognizes exactly the single-slide/single-capture case and
//! refuses to guess on anything else — castling, en passant, or a reset all
//! touch more cells than one conventional move and come back
//! [`DiffOutcome::Indeterminate`], which the caller handles by replacing the
//! whole board.

use crate::board::Grid;
use crate::common::Square;

/// A single inferred or proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Whether the destination was occupied in the old snapshot.
    pub captured: bool,
}

/// Outcome of a snapshot comparison. `Indeterminate` is a recognized result,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOutcome {
    Move(Move),
    Indeterminate,
}

/// Infer the single move explaining the difference between `old` and `new`.
///
/// One linear scan over the 64 cell pairs:
/// - occupied then empty: candidate origin,
/// - empty then occupied, or occupied by a different piece: candidate
///   destination,
/// - exactly one of each yields a `Move`; zero or several of either kind is
///   `Indeterminate`.
pub fn diff(old: &Grid, new: &Grid) -> DiffOutcome {
    let mut origin: Option<Square> = None;
    let mut dest: Option<Square> = None;
    let mut origins = 0usize;
    let mut dests = 0usize;

    for sq in Square::all() {
        let before = old[sq.row as usize][sq.col as usize];
        let after = new[sq.row as usize][sq.col as usize];
        match (before, after) {
            (Some(_), None) => {
                origin = Some(sq);
                origins += 1;
            }
            (None, Some(_)) => {
                dest = Some(sq);
                dests += 1;
            }
            (Some(a), Some(b)) if a != b => {
                dest = Some(sq);
                dests += 1;
            }
            _ => {}
        }
    }

    match (origin, dest) {
        (Some(from), Some(to)) if origins == 1 && dests == 1 => DiffOutcome::Move(Move {
            from,
            to,
            captured: old[to.row as usize][to.col as usize].is_some(),
        }),
        _ => DiffOutcome::Indeterminate,
    }
}
