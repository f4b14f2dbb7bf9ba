use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chessroom::protocol::{
    CreateResponse, JoinResponse, MoveRequest, MoveResponse, MovesResponse, StateResponse,
};
use chessroom::transport::Transport;
use chessroom::{Board, Piece, PieceKind, Presenter, Side, Snapshot, Square, SyncLoop};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Render,
    Slide(Square, Square, bool),
    Notify(String),
}

#[derive(Default)]
struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
}

impl RecordingPresenter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn render_full_board(&self, _board: &Board) {
        self.events.lock().unwrap().push(Event::Render);
    }
    fn animate_slide(&self, from: Square, to: Square, capture: bool) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Slide(from, to, capture));
    }
    fn highlight_candidates(&self, _squares: &[Square]) {}
    fn clear_highlights(&self) {}
    fn notify_user(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Notify(message.to_string()));
    }
}

/// Serves a fixed state response and counts how often it is asked.
struct StaticState {
    state: Option<StateResponse>,
    calls: AtomicUsize,
}

impl StaticState {
    fn serving(state: StateResponse) -> Arc<Self> {
        Arc::new(StaticState {
            state: Some(state),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(StaticState {
            state: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for StaticState {
    async fn create_room(&self) -> anyhow::Result<CreateResponse> {
        anyhow::bail!("not used")
    }
    async fn join_room(&self, _room: &str) -> anyhow::Result<JoinResponse> {
        anyhow::bail!("not used")
    }
    async fn fetch_state(&self, _room: &str) -> anyhow::Result<StateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.state {
            Some(state) => Ok(state.clone()),
            None => anyhow::bail!("connection refused"),
        }
    }
    async fn fetch_moves(&self, _room: &str, _origin: Square) -> anyhow::Result<MovesResponse> {
        anyhow::bail!("not used")
    }
    async fn submit_move(&self, _req: &MoveRequest) -> anyhow::Result<MoveResponse> {
        anyhow::bail!("not used")
    }
    async fn leave(&self, _room: &str, _side: Side) {}
}

fn state_after<F: FnOnce(&mut Board)>(turn: Side, play: F) -> StateResponse {
    let mut board = Board::new();
    play(&mut board);
    StateResponse::from_snapshot(&Snapshot {
        grid: *board.grid(),
        turn,
    })
}

fn build_loop(
    transport: Arc<StaticState>,
    mirror_turn: Side,
) -> (Arc<Mutex<Board>>, Arc<RecordingPresenter>, SyncLoop) {
    let board = Arc::new(Mutex::new(Board::new()));
    board.lock().unwrap().set_turn(mirror_turn);
    let presenter = Arc::new(RecordingPresenter::default());
    let sync = SyncLoop::new(
        transport as Arc<dyn Transport>,
        Arc::clone(&board),
        Arc::clone(&presenter) as Arc<dyn Presenter>,
        "ROOM1",
        Side::White,
    );
    (board, presenter, sync)
}

#[tokio::test]
async fn no_fetch_on_the_local_players_turn() {
    let transport = StaticState::serving(state_after(Side::White, |_| {}));
    let (_board, presenter, sync) = build_loop(Arc::clone(&transport), Side::White);

    sync.tick().await;
    assert_eq!(transport.calls(), 0);
    assert_eq!(presenter.events(), vec![]);
}

#[tokio::test]
async fn opponent_move_is_inferred_and_applied() {
    // Server: black played (1,4) -> (3,4), white to move.
    let transport = StaticState::serving(state_after(Side::White, |board| {
        board.apply_move(Square::new(1, 4), Square::new(3, 4));
    }));
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    assert_eq!(transport.calls(), 1);

    let board = board.lock().unwrap();
    assert_eq!(board.occupant(Square::new(1, 4)), None);
    assert_eq!(
        board.occupant(Square::new(3, 4)),
        Some(Piece::new(Side::Black, PieceKind::Pawn))
    );
    assert_eq!(board.turn(), Side::White);
    assert_eq!(
        presenter.events(),
        vec![Event::Slide(Square::new(1, 4), Square::new(3, 4), false)]
    );
}

#[tokio::test]
async fn capture_is_animated_as_such() {
    let transport = StaticState::serving(state_after(Side::White, |board| {
        // Black queen takes the white pawn on (6,3).
        board.apply_move(Square::new(0, 3), Square::new(6, 3));
    }));
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    assert_eq!(
        presenter.events(),
        vec![Event::Slide(Square::new(0, 3), Square::new(6, 3), true)]
    );
    assert_eq!(
        board.lock().unwrap().occupant(Square::new(6, 3)),
        Some(Piece::new(Side::Black, PieceKind::Queen))
    );
}

#[tokio::test]
async fn nothing_happens_while_the_opponent_is_still_thinking() {
    let transport = StaticState::serving(state_after(Side::Black, |_| {}));
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    assert_eq!(transport.calls(), 1);
    assert_eq!(board.lock().unwrap().turn(), Side::Black);
    assert_eq!(presenter.events(), vec![]);
}

#[tokio::test]
async fn failed_fetch_is_retried_by_the_next_tick() {
    let transport = StaticState::failing();
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    sync.tick().await;
    assert_eq!(transport.calls(), 2);
    assert_eq!(board.lock().unwrap().turn(), Side::Black);
    assert_eq!(presenter.events(), vec![]);
}

#[tokio::test]
async fn malformed_state_is_ignored() {
    let mut state = state_after(Side::White, |_| {});
    state.board.pop();
    let transport = StaticState::serving(state);
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    assert_eq!(board.lock().unwrap().turn(), Side::Black);
    assert_eq!(presenter.events(), vec![]);
}

#[tokio::test]
async fn multi_square_changes_trigger_a_full_replace() {
    // Castling-shaped double change cannot be explained as one move.
    let transport = StaticState::serving(state_after(Side::White, |board| {
        board.apply_move(Square::new(0, 4), Square::new(0, 6));
        board.apply_move(Square::new(0, 7), Square::new(0, 5));
    }));
    let (board, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    let board = board.lock().unwrap();
    assert_eq!(board.turn(), Side::White);
    assert_eq!(
        board.occupant(Square::new(0, 6)),
        Some(Piece::new(Side::Black, PieceKind::King))
    );
    assert_eq!(
        board.occupant(Square::new(0, 5)),
        Some(Piece::new(Side::Black, PieceKind::Rook))
    );
    assert_eq!(presenter.events(), vec![Event::Render]);
}

#[tokio::test]
async fn occupant_swaps_without_vacating_trigger_a_full_replace() {
    // Two cells change color and neither becomes empty.
    let base = Board::new();
    let mut grid = *base.grid();
    grid[0][0] = Some(Piece::new(Side::White, PieceKind::Rook));
    grid[7][0] = Some(Piece::new(Side::Black, PieceKind::Rook));
    let transport = StaticState::serving(StateResponse::from_snapshot(&Snapshot {
        grid,
        turn: Side::White,
    }));
    let (mirror, presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);

    sync.tick().await;
    let mirror = mirror.lock().unwrap();
    assert_eq!(mirror.grid(), &grid);
    assert_eq!(mirror.turn(), Side::White);
    assert_eq!(presenter.events(), vec![Event::Render]);
}

#[tokio::test(start_paused = true)]
async fn run_stops_once_shut_down() {
    let transport = StaticState::serving(state_after(Side::Black, |_| {}));
    let (_board, _presenter, sync) = build_loop(Arc::clone(&transport), Side::Black);
    let shutdown = sync.shutdown_handle();

    let task = tokio::spawn(async move { sync.run().await });
    shutdown.store(true, Ordering::SeqCst);
    tokio::time::timeout(std::time::Duration::from_secs(10), task)
        .await
        .expect("loop should exit after shutdown")
        .unwrap();
}
