use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chessroom::transport::http::HttpTransport;
use chessroom::transport::in_memory::InMemoryServer;
use chessroom::transport::Transport;
use chessroom::{
    init_logging, parse_square, Board, MoveClient, Presenter, Session, Side, Square, SyncLoop,
    TerminalPresenter,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new room on a server and wait for an opponent.
    Create {
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server: String,
    },
    /// Join an existing room by its code.
    Join {
        /// Room code shown to the room's creator.
        room: String,
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        server: String,
    },
    /// Play against a trivial responder on an in-process server.
    Local,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { server } => {
            let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(server)?);
            let resp = transport
                .create_room()
                .await
                .context("could not create a room")?;
            println!("Room code: {} (share it with your opponent)", resp.room);
            play(transport, resp.room, Side::White).await
        }
        Commands::Join { room, server } => {
            let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(server)?);
            let resp = transport
                .join_room(&room)
                .await
                .context("could not join the room")?;
            match (resp.status.as_str(), resp.side) {
                ("success", Some(side)) => play(transport, room, side).await,
                _ => {
                    let reason = resp
                        .message
                        .unwrap_or_else(|| "Room is full or doesn't exist.".into());
                    println!("⚠ {}", reason);
                    Ok(())
                }
            }
        }
        Commands::Local => {
            let server = Arc::new(InMemoryServer::new());
            let resp = server.create_room().await?;
            println!("Local game in room {}", resp.room);
            tokio::spawn(auto_responder(Arc::clone(&server), resp.room.clone()));
            play(server, resp.room, Side::White).await
        }
    }
}

async fn play(transport: Arc<dyn Transport>, room: String, side: Side) -> anyhow::Result<()> {
    // Authoritative snapshot before anything is shown.
    let snapshot = transport
        .fetch_state(&room)
        .await
        .context("could not fetch the initial state")?
        .decode()
        .context("server sent a malformed board")?;
    let board = Arc::new(Mutex::new(Board::from_snapshot(&snapshot)));
    let presenter: Arc<dyn Presenter> = Arc::new(TerminalPresenter::new(side));
    presenter.render_full_board(&board.lock().unwrap());
    println!(
        "You play {}. Type a square (e2) to select, two (e2 e4) to move, 'board' to reprint, 'quit' to leave.",
        side
    );

    let sync = SyncLoop::new(
        Arc::clone(&transport),
        Arc::clone(&board),
        Arc::clone(&presenter),
        room.clone(),
        side,
    );
    let shutdown = sync.shutdown_handle();
    let sync_task = tokio::spawn(async move { sync.run().await });

    let client = MoveClient::new(Arc::clone(&transport), room.clone());
    let mut session = Session::new(
        Arc::clone(&board),
        client,
        Arc::clone(&transport),
        Arc::clone(&presenter),
        side,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "q" => break,
            "board" | "b" => presenter.render_full_board(&board.lock().unwrap()),
            _ => {
                let squares: Vec<Option<Square>> =
                    line.split_whitespace().map(parse_square).collect();
                match squares.as_slice() {
                    [Some(sq)] => session.click(*sq).await,
                    [Some(from), Some(to)] => {
                        session.click(*from).await;
                        session.click(*to).await;
                    }
                    _ => println!("⚠ Could not read that; try 'e2' or 'e2 e4'."),
                }
            }
        }
    }

    session.leave().await;
    shutdown.store(true, Ordering::SeqCst);
    sync_task.abort();
    Ok(())
}

/// Opponent for local mode: joins as black and, whenever it is black's move,
/// plays the first server-suggested step onto a free square.
async fn auto_responder(server: Arc<InMemoryServer>, room: String) {
    if server.join_room(&room).await.is_err() {
        return;
    }
    loop {
        sleep(Duration::from_millis(1200)).await;
        let Ok(state) = server.fetch_state(&room).await else {
            // Room deleted; the game is over.
            return;
        };
        let Ok(snapshot) = state.decode() else {
            continue;
        };
        if snapshot.turn != Side::Black {
            continue;
        }
        let Some((from, to)) = pick_reply(&server, &room, &snapshot.grid).await else {
            log::info!("responder has no move left in room {}", room);
            return;
        };
        let req = chessroom::protocol::MoveRequest {
            room: room.clone(),
            from: from.into(),
            to: to.into(),
        };
        let _ = server.submit_move(&req).await;
    }
}

async fn pick_reply(
    server: &InMemoryServer,
    room: &str,
    grid: &chessroom::Grid,
) -> Option<(Square, Square)> {
    for sq in Square::all() {
        let Some(piece) = grid[sq.row as usize][sq.col as usize] else {
            continue;
        };
        if piece.side != Side::Black {
            continue;
        }
        let Ok(resp) = server.fetch_moves(room, sq).await else {
            continue;
        };
        let Ok(Some(candidates)) = resp.decode() else {
            continue;
        };
        for to in candidates {
            if grid[to.row as usize][to.col as usize].is_none() {
                return Some((sq, to));
            }
        }
    }
    None
}
