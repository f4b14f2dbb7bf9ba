//! Periodic reconciliation against the authoritative server.
//!
//! The server does not push; this loop polls at a fixed interval, but only
//! while it is the opponent's move. When the turn passes back, the cached
//! and fetched grids are diffed: a single conventional move is animated and
//! applied in place, anything else falls back to a full replace and
//! re-render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::interval;

use crate::board::Board;
use crate::common::Side;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::diff::{diff, DiffOutcome};
use crate::presenter::Presenter;
use crate::transport::Transport;

pub struct SyncLoop {
    transport: Arc<dyn Transport>,
    // Shared with the session; see the race note there (last write wins).
    board: Arc<Mutex<Board>>,
    presenter: Arc<dyn Presenter>,
    room: String,
    side: Side,
    poll_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl SyncLoop {
    pub fn new(
        transport: Arc<dyn Transport>,
        board: Arc<Mutex<Board>>,
        presenter: Arc<dyn Presenter>,
        room: impl Into<String>,
        side: Side,
    ) -> Self {
        SyncLoop {
            transport,
            board,
            presenter,
            room: room.into(),
            side,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Handle for cancelling the loop from another task.
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Poll until shut down.
    pub async fn run(&self) {
        let mut ticker = interval(self.poll_interval);
        // The first tick completes immediately; skip it so a fresh session
        // does not poll before the interval has elapsed once.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::SeqCst) {
                return;
            }
            self.tick().await;
        }
    }

    /// One reconciliation step.
    ///
    /// No-op on the local player's turn — the collaborator is not even
    /// invoked. A failed fetch or a malformed payload is logged and retried
    /// by virtue of the next tick, never escalated.
    pub async fn tick(&self) {
        let (turn, old_grid) = {
            let board = self.board.lock().unwrap();
            (board.turn(), *board.grid())
        };
        if turn == self.side {
            return;
        }

        let resp = match self.transport.fetch_state(&self.room).await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("state poll failed: {}", err);
                return;
            }
        };
        let snapshot = match resp.decode() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("malformed state payload: {}", err);
                return;
            }
        };
        if snapshot.turn != self.side {
            // Opponent still thinking.
            return;
        }

        match diff(&old_grid, &snapshot.grid) {
            DiffOutcome::Move(mv) => {
                debug!("opponent moved {} -> {}", mv.from, mv.to);
                {
                    let mut board = self.board.lock().unwrap();
                    board.apply_move(mv.from, mv.to);
                    board.set_turn(self.side);
                }
                self.presenter.animate_slide(mv.from, mv.to, mv.captured);
            }
            DiffOutcome::Indeterminate => {
                debug!("no single move explains the new snapshot, replacing board");
                let mut board = self.board.lock().unwrap();
                board.replace(&snapshot);
                self.presenter.render_full_board(&board);
            }
        }
    }
}
