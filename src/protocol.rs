//! Wire types for the room server's JSON bodies, and the glyph-grid codec.
//!
//! The client must not assume well-formed payloads: decoding failures are
//! reported as [`DecodeError`] and callers treat them like an unreachable
//! server rather than crashing.

use serde::{Deserialize, Serialize};

use crate::board::{Grid, Snapshot};
use crate::common::{Side, Square};
use crate::config::BOARD_SIZE;
use crate::piece::Piece;

/// Body of `POST /create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub room: String,
}

/// Body of `POST /join`. On error the server fills `message` instead of
/// `side`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub status: String,
    #[serde(default)]
    pub side: Option<Side>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /state`. Extra fields (the seat list) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub board: Vec<Vec<String>>,
    pub turn: Side,
}

/// Body of `GET /moves`. An absent `moves` key is not the same as an empty
/// list; the caller distinguishes "no candidates reported" from "legally no
/// moves".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovesResponse {
    #[serde(default)]
    pub moves: Option<Vec<[u8; 2]>>,
}

/// Body of `POST /move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub room: String,
    pub from: [u8; 2],
    pub to: [u8; 2],
}

/// Response to `POST /move`. Anything but `"success"` is a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: String,
}

/// Errors decoding a server payload into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The board was not an 8×8 matrix.
    BadDimensions,
    /// A cell held something other than a piece glyph or the empty string.
    UnknownGlyph(String),
    /// A coordinate was outside the board.
    CoordOutOfRange([u8; 2]),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::BadDimensions => write!(f, "board is not {0}x{0}", BOARD_SIZE),
            DecodeError::UnknownGlyph(glyph) => write!(f, "unknown piece glyph {:?}", glyph),
            DecodeError::CoordOutOfRange(raw) => {
                write!(f, "coordinate [{}, {}] out of range", raw[0], raw[1])
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a wire glyph grid.
pub fn decode_grid(cells: &[Vec<String>]) -> Result<Grid, DecodeError> {
    if cells.len() != BOARD_SIZE {
        return Err(DecodeError::BadDimensions);
    }
    let mut grid: Grid = [[None; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in cells.iter().enumerate() {
        if row.len() != BOARD_SIZE {
            return Err(DecodeError::BadDimensions);
        }
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let piece =
                Piece::from_glyph(cell).ok_or_else(|| DecodeError::UnknownGlyph(cell.clone()))?;
            grid[r][c] = Some(piece);
        }
    }
    Ok(grid)
}

/// Encode a grid back into wire form.
pub fn encode_grid(grid: &Grid) -> Vec<Vec<String>> {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map(|p| p.glyph().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

impl StateResponse {
    /// Decode into an authoritative snapshot.
    pub fn decode(&self) -> Result<Snapshot, DecodeError> {
        Ok(Snapshot {
            grid: decode_grid(&self.board)?,
            turn: self.turn,
        })
    }

    /// Encode a snapshot for serving.
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        StateResponse {
            board: encode_grid(&snap.grid),
            turn: snap.turn,
        }
    }
}

impl MovesResponse {
    /// Validate and convert the candidate list, if the key was present.
    pub fn decode(&self) -> Result<Option<Vec<Square>>, DecodeError> {
        match &self.moves {
            None => Ok(None),
            Some(raw) => raw
                .iter()
                .map(|&pair| {
                    Square::try_from(pair).map_err(|()| DecodeError::CoordOutOfRange(pair))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }
}
