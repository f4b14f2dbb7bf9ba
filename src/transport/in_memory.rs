//! In-process implementation of [`Transport`], mirroring the development
//! server the client is normally pointed at.
//!
//! Deliberately rules-free: it hands out pawn-style one/two-step forward
//! hints for any piece, applies any submitted move blindly and flips the
//! turn. It exists to exercise the client — local demo mode and the test
//! suite — not to play chess.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Snapshot;
use crate::common::{Side, Square};
use crate::config::{initial_grid, BOARD_SIZE, ROOM_CODE_LEN};
use crate::protocol::{
    encode_grid, CreateResponse, JoinResponse, MoveRequest, MoveResponse, MovesResponse,
    StateResponse,
};
use crate::transport::Transport;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

struct Room {
    snapshot: Snapshot,
    players: Vec<Side>,
}

pub struct InMemoryServer {
    rooms: Mutex<HashMap<String, Room>>,
    rng: Mutex<SmallRng>,
}

impl InMemoryServer {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Fixed seed for reproducible room codes.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        InMemoryServer {
            rooms: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    fn fresh_code(&self) -> String {
        let mut rng = self.rng.lock().unwrap();
        (0..ROOM_CODE_LEN)
            .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
            .collect()
    }

    /// Number of open rooms, for assertions in tests.
    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}

impl Default for InMemoryServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryServer {
    async fn create_room(&self) -> anyhow::Result<CreateResponse> {
        let code = self.fresh_code();
        let mut rooms = self.rooms.lock().unwrap();
        rooms.insert(
            code.clone(),
            Room {
                snapshot: Snapshot {
                    grid: initial_grid(),
                    turn: Side::White,
                },
                players: vec![Side::White],
            },
        );
        Ok(CreateResponse { room: code })
    }

    async fn join_room(&self, room: &str) -> anyhow::Result<JoinResponse> {
        let mut rooms = self.rooms.lock().unwrap();
        let Some(entry) = rooms.get_mut(room) else {
            return Ok(JoinResponse {
                status: "error".into(),
                side: None,
                message: Some("Room not found".into()),
            });
        };
        for side in [Side::White, Side::Black] {
            if !entry.players.contains(&side) {
                entry.players.push(side);
                return Ok(JoinResponse {
                    status: "success".into(),
                    side: Some(side),
                    message: None,
                });
            }
        }
        Ok(JoinResponse {
            status: "error".into(),
            side: None,
            message: Some("Room is full".into()),
        })
    }

    async fn fetch_state(&self, room: &str) -> anyhow::Result<StateResponse> {
        let rooms = self.rooms.lock().unwrap();
        let entry = rooms
            .get(room)
            .ok_or_else(|| anyhow::anyhow!("Room not found"))?;
        Ok(StateResponse {
            board: encode_grid(&entry.snapshot.grid),
            turn: entry.snapshot.turn,
        })
    }

    async fn fetch_moves(&self, room: &str, origin: Square) -> anyhow::Result<MovesResponse> {
        let rooms = self.rooms.lock().unwrap();
        let entry = rooms
            .get(room)
            .ok_or_else(|| anyhow::anyhow!("Room not found"))?;
        let occupant = entry.snapshot.grid[origin.row as usize][origin.col as usize];
        // Pawn-style hints regardless of piece kind; anything non-white
        // (including an empty cell) marches downward, matching the
        // development server.
        let dir: i16 = match occupant {
            Some(p) if p.side == Side::White => -1,
            _ => 1,
        };
        let moves = [1i16, 2]
            .iter()
            .filter_map(|&step| {
                let row = origin.row as i16 + dir * step;
                (0..BOARD_SIZE as i16)
                    .contains(&row)
                    .then(|| [row as u8, origin.col])
            })
            .collect();
        Ok(MovesResponse { moves: Some(moves) })
    }

    async fn submit_move(&self, req: &MoveRequest) -> anyhow::Result<MoveResponse> {
        let mut rooms = self.rooms.lock().unwrap();
        let (Ok(from), Ok(to)) = (Square::try_from(req.from), Square::try_from(req.to)) else {
            return Ok(MoveResponse {
                status: "error".into(),
            });
        };
        let Some(entry) = rooms.get_mut(&req.room) else {
            return Ok(MoveResponse {
                status: "error".into(),
            });
        };
        // Blind apply and turn flip; legality is not this server's business.
        let grid = &mut entry.snapshot.grid;
        grid[to.row as usize][to.col as usize] = grid[from.row as usize][from.col as usize].take();
        entry.snapshot.turn = entry.snapshot.turn.opponent();
        Ok(MoveResponse {
            status: "success".into(),
        })
    }

    async fn leave(&self, room: &str, side: Side) {
        let mut rooms = self.rooms.lock().unwrap();
        if let Some(entry) = rooms.get_mut(room) {
            entry.players.retain(|&p| p != side);
            if entry.players.is_empty() {
                rooms.remove(room);
            }
        }
    }
}
