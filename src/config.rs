use core::time::Duration;

use crate::board::Grid;
use crate::common::Side;
use crate::piece::{Piece, PieceKind};

/// Board edge length.
pub const BOARD_SIZE: usize = 8;

/// How often the sync loop polls for the opponent's move.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Budget for a candidate-destinations query before it is abandoned.
pub const DESTINATIONS_TIMEOUT: Duration = Duration::from_millis(500);

/// Budget for a move submission before it is abandoned.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Coarse per-request timeout applied by the HTTP transport.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Length of server-assigned room codes.
pub const ROOM_CODE_LEN: usize = 5;

/// Environment variable controlling the log level.
pub const LOG_ENV: &str = "CHESSROOM_LOG";

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The standard starting position, black on rows 0-1, white on rows 6-7.
pub fn initial_grid() -> Grid {
    let mut grid: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];
    for c in 0..BOARD_SIZE {
        grid[0][c] = Some(Piece::new(Side::Black, BACK_RANK[c]));
        grid[1][c] = Some(Piece::new(Side::Black, PieceKind::Pawn));
        grid[6][c] = Some(Piece::new(Side::White, PieceKind::Pawn));
        grid[7][c] = Some(Piece::new(Side::White, BACK_RANK[c]));
    }
    grid
}
