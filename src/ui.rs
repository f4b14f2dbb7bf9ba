//! Terminal front end: board printing and coordinate parsing.

use crate::board::Board;
use crate::common::{Side, Square};
use crate::config::BOARD_SIZE;
use crate::presenter::Presenter;

/// Parse algebraic notation ("e2") into a square. Row 0 is rank 8.
pub fn parse_square(input: &str) -> Option<Square> {
    let mut chars = input.trim().chars();
    let file = chars.next()?.to_ascii_lowercase();
    let rank = chars.next()?.to_digit(10)?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
        return None;
    }
    let col = (file as u8) - b'a';
    let row = BOARD_SIZE as u8 - rank as u8;
    Some(Square::new(row, col))
}

/// Presenter printing to the terminal. Black sees the board rotated, the
/// same perspective flip the browser client applies.
pub struct TerminalPresenter {
    perspective: Side,
}

impl TerminalPresenter {
    pub fn new(perspective: Side) -> Self {
        TerminalPresenter { perspective }
    }

    fn row_order(&self) -> Vec<usize> {
        let rows = 0..BOARD_SIZE;
        match self.perspective {
            Side::White => rows.collect(),
            Side::Black => rows.rev().collect(),
        }
    }

    fn col_order(&self) -> Vec<usize> {
        let cols = 0..BOARD_SIZE;
        match self.perspective {
            Side::White => cols.collect(),
            Side::Black => cols.rev().collect(),
        }
    }

    fn print_board(&self, board: &Board) {
        print!("  ");
        for c in self.col_order() {
            print!(" {}", (b'a' + c as u8) as char);
        }
        println!();
        for r in self.row_order() {
            print!("{} ", BOARD_SIZE - r);
            for c in self.col_order() {
                match board.grid()[r][c] {
                    Some(piece) => print!(" {}", piece.glyph()),
                    None => print!(" ·"),
                }
            }
            println!();
        }
        println!("{} to move", board.turn());
    }
}

impl Presenter for TerminalPresenter {
    fn render_full_board(&self, board: &Board) {
        println!();
        self.print_board(board);
    }

    fn animate_slide(&self, from: Square, to: Square, capture: bool) {
        // The bell stands in for the move sound.
        if capture {
            println!("\u{7}move {} → {} (capture)", from, to);
        } else {
            println!("\u{7}move {} → {}", from, to);
        }
    }

    fn highlight_candidates(&self, squares: &[Square]) {
        if squares.is_empty() {
            println!("no legal destinations");
            return;
        }
        let list: Vec<String> = squares.iter().map(|sq| sq.to_string()).collect();
        println!("destinations: {}", list.join(" "));
    }

    fn clear_highlights(&self) {}

    fn notify_user(&self, message: &str) {
        println!("⚠ {}", message);
    }
}
