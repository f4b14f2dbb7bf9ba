//! Interactive session: selection state, gating, and the submit flow.
//!
//! The session is the single caller of the gate and the move client. It owns
//! the selection (including deselect-on-reselect) and applies a move to the
//! shared board mirror only after the server accepts it.

use std::sync::{Arc, Mutex};

use log::info;

use crate::board::Board;
use crate::client::{Destinations, MoveClient, SubmitOutcome};
use crate::common::{Side, Square};
use crate::gate::{check_attempt, AttemptBlocked};
use crate::presenter::Presenter;
use crate::transport::Transport;

pub struct Session {
    // Shared with the sync loop. Both tasks write; neither suppresses the
    // other, so a pending submit racing a poll resolves to whichever
    // response lands last (last write wins).
    board: Arc<Mutex<Board>>,
    client: MoveClient,
    transport: Arc<dyn Transport>,
    presenter: Arc<dyn Presenter>,
    side: Side,
    selected: Option<Square>,
    candidates: Vec<Square>,
}

impl Session {
    pub fn new(
        board: Arc<Mutex<Board>>,
        client: MoveClient,
        transport: Arc<dyn Transport>,
        presenter: Arc<dyn Presenter>,
        side: Side,
    ) -> Self {
        Session {
            board,
            client,
            transport,
            presenter,
            side,
            selected: None,
            candidates: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Handle a square activation: a highlighted candidate completes the
    /// pending move, anything else is treated as a selection attempt.
    pub async fn click(&mut self, square: Square) {
        if let Some(from) = self.selected {
            if square == from {
                // Reselecting the selection is a deselect.
                self.drop_selection();
                return;
            }
            if self.candidates.contains(&square) {
                self.submit(from, square).await;
                return;
            }
        }
        self.try_select(square).await;
    }

    async fn try_select(&mut self, square: Square) {
        let verdict = {
            let board = self.board.lock().unwrap();
            check_attempt(&board, square, self.side)
        };
        match verdict {
            Ok(()) => self.select(square).await,
            Err(AttemptBlocked::NotYourTurn) => {
                self.presenter.notify_user(&AttemptBlocked::NotYourTurn.to_string());
            }
            Err(AttemptBlocked::OpponentPiece) => {
                // Ignored without a notice, as clicking past an opponent
                // piece is routine.
            }
            Err(AttemptBlocked::EmptySquare) => self.drop_selection(),
        }
    }

    async fn select(&mut self, square: Square) {
        self.drop_selection();
        self.selected = Some(square);
        match self.client.request_destinations(square).await {
            Destinations::Available(squares) => {
                self.presenter.highlight_candidates(&squares);
                self.candidates = squares;
            }
            Destinations::Unavailable => {
                self.presenter
                    .notify_user("Connection error: cannot fetch moves.");
                self.selected = None;
            }
        }
    }

    async fn submit(&mut self, from: Square, to: Square) {
        match self.client.submit(from, to).await {
            SubmitOutcome::Accepted => {
                let captured = {
                    let mut board = self.board.lock().unwrap();
                    let captured = board.apply_move(from, to);
                    board.set_turn(self.side.opponent());
                    captured
                };
                info!("move {} -> {} accepted", from, to);
                self.presenter.animate_slide(from, to, captured);
            }
            SubmitOutcome::Rejected => {
                self.presenter.notify_user("Server: invalid move.");
            }
            SubmitOutcome::Unavailable => {
                self.presenter.notify_user("Move failed: server unreachable.");
            }
        }
        // Every outcome ends the attempt so a fresh one can be made.
        self.drop_selection();
    }

    fn drop_selection(&mut self) {
        self.selected = None;
        self.candidates.clear();
        self.presenter.clear_highlights();
    }

    /// Best-effort departure notice on teardown.
    pub async fn leave(&self) {
        self.transport.leave(self.client.room(), self.side).await;
    }
}
