//! The request/response half of the move protocol.
//!
//! Both operations are bounded by a timeout and map every failure —
//! transport error, expiry, malformed payload — onto a soft outcome. The
//! client never mutates the board; the session applies a move only after the
//! server accepts it.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::timeout;

use crate::common::Square;
use crate::config::{DESTINATIONS_TIMEOUT, SUBMIT_TIMEOUT};
use crate::protocol::MoveRequest;
use crate::transport::Transport;

/// Result of a candidate-destinations query.
///
/// `Available(vec![])` means the server answered "legally, no moves";
/// `Unavailable` means no trustworthy answer arrived. Callers must not
/// conflate the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destinations {
    Available(Vec<Square>),
    Unavailable,
}

/// Authoritative verdict on a submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
    Unavailable,
}

pub struct MoveClient {
    transport: Arc<dyn Transport>,
    room: String,
    destinations_timeout: Duration,
    submit_timeout: Duration,
}

impl MoveClient {
    pub fn new(transport: Arc<dyn Transport>, room: impl Into<String>) -> Self {
        MoveClient {
            transport,
            room: room.into(),
            destinations_timeout: DESTINATIONS_TIMEOUT,
            submit_timeout: SUBMIT_TIMEOUT,
        }
    }

    /// Override the default budgets.
    pub fn with_timeouts(mut self, destinations: Duration, submit: Duration) -> Self {
        self.destinations_timeout = destinations;
        self.submit_timeout = submit;
        self
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Ask the server which destinations are legal for `origin`.
    pub async fn request_destinations(&self, origin: Square) -> Destinations {
        let fetch = self.transport.fetch_moves(&self.room, origin);
        let resp = match timeout(self.destinations_timeout, fetch).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => {
                warn!("destinations query for {} failed: {}", origin, err);
                return Destinations::Unavailable;
            }
            Err(_) => {
                warn!(
                    "destinations query for {} timed out after {:?}",
                    origin, self.destinations_timeout
                );
                return Destinations::Unavailable;
            }
        };
        match resp.decode() {
            Ok(Some(squares)) => {
                debug!("{} candidate destinations for {}", squares.len(), origin);
                Destinations::Available(squares)
            }
            Ok(None) => Destinations::Unavailable,
            Err(err) => {
                warn!("malformed destinations payload: {}", err);
                Destinations::Unavailable
            }
        }
    }

    /// Propose `from` → `to` and interpret the server's verdict.
    pub async fn submit(&self, from: Square, to: Square) -> SubmitOutcome {
        let req = MoveRequest {
            room: self.room.clone(),
            from: from.into(),
            to: to.into(),
        };
        match timeout(self.submit_timeout, self.transport.submit_move(&req)).await {
            Ok(Ok(resp)) if resp.status == "success" => SubmitOutcome::Accepted,
            Ok(Ok(resp)) => {
                debug!("server rejected {} -> {}: status {:?}", from, to, resp.status);
                SubmitOutcome::Rejected
            }
            Ok(Err(err)) => {
                warn!("move submission {} -> {} failed: {}", from, to, err);
                SubmitOutcome::Unavailable
            }
            Err(_) => {
                warn!(
                    "move submission {} -> {} timed out after {:?}",
                    from, to, self.submit_timeout
                );
                SubmitOutcome::Unavailable
            }
        }
    }
}
