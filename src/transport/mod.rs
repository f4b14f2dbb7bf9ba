//! Access to the room server's endpoints.

use crate::common::{Side, Square};
use crate::protocol::{CreateResponse, JoinResponse, MoveRequest, MoveResponse, MovesResponse, StateResponse};

/// The server endpoints the client consumes. Implementations report
/// transport-level failures through `anyhow::Result`; interpreting payloads
/// (including malformed ones) is the caller's concern.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Open a new room. The creator is seated as white.
    async fn create_room(&self) -> anyhow::Result<CreateResponse>;

    /// Take a free seat in an existing room.
    async fn join_room(&self, room: &str) -> anyhow::Result<JoinResponse>;

    /// Fetch the authoritative board and turn.
    async fn fetch_state(&self, room: &str) -> anyhow::Result<StateResponse>;

    /// Fetch the server-computed candidate destinations for an origin.
    async fn fetch_moves(&self, room: &str, origin: Square) -> anyhow::Result<MovesResponse>;

    /// Propose a move; the server answers with its authoritative verdict.
    async fn submit_move(&self, req: &MoveRequest) -> anyhow::Result<MoveResponse>;

    /// Best-effort departure notice. Does not await a response; failures are
    /// silently ignored.
    async fn leave(&self, room: &str, side: Side);
}

pub mod http;
pub mod in_memory;
