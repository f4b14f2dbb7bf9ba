use chessroom::{Board, Piece, PieceKind, Side, Snapshot, Square};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

#[test]
fn initial_position_and_turn() {
    let board = Board::new();
    assert_eq!(board.turn(), Side::White);
    assert_eq!(
        board.occupant(sq(6, 4)),
        Some(Piece::new(Side::White, PieceKind::Pawn))
    );
    assert_eq!(
        board.occupant(sq(0, 4)),
        Some(Piece::new(Side::Black, PieceKind::King))
    );
    assert_eq!(board.occupant(sq(4, 4)), None);
}

#[test]
fn apply_move_slides_and_reports_capture() {
    let mut board = Board::new();
    let captured = board.apply_move(sq(6, 4), sq(4, 4));
    assert!(!captured);
    assert_eq!(board.occupant(sq(6, 4)), None);
    assert_eq!(
        board.occupant(sq(4, 4)),
        Some(Piece::new(Side::White, PieceKind::Pawn))
    );

    // March the pawn into the black pawn rank: that one is a capture.
    board.apply_move(sq(4, 4), sq(3, 4));
    board.apply_move(sq(3, 4), sq(2, 4));
    let captured = board.apply_move(sq(2, 4), sq(1, 4));
    assert!(captured);
    assert_eq!(
        board.occupant(sq(1, 4)),
        Some(Piece::new(Side::White, PieceKind::Pawn))
    );
}

#[test]
fn apply_move_does_not_flip_turn() {
    let mut board = Board::new();
    board.apply_move(sq(6, 4), sq(4, 4));
    assert_eq!(board.turn(), Side::White);
    board.set_turn(Side::Black);
    assert_eq!(board.turn(), Side::Black);
}

#[test]
fn apply_move_from_empty_square_clears_destination() {
    // No legality check: the mirror does whatever the authoritative state
    // implies, even a nonsensical slide.
    let mut board = Board::new();
    let captured = board.apply_move(sq(4, 4), sq(6, 4));
    assert!(captured);
    assert_eq!(board.occupant(sq(6, 4)), None);
    assert_eq!(board.occupant(sq(4, 4)), None);
}

#[test]
fn replace_swaps_grid_and_turn() {
    let mut board = Board::new();
    let mut other = Board::new();
    other.apply_move(sq(1, 0), sq(3, 0));
    let snapshot = Snapshot {
        grid: *other.grid(),
        turn: Side::Black,
    };

    board.replace(&snapshot);
    assert_eq!(board.turn(), Side::Black);
    assert_eq!(board.occupant(sq(1, 0)), None);
    assert_eq!(
        board.occupant(sq(3, 0)),
        Some(Piece::new(Side::Black, PieceKind::Pawn))
    );
}

#[test]
fn piece_id_follows_the_moved_piece() {
    let mut board = Board::new();
    let id = board.piece_id_at(sq(6, 4)).unwrap();
    board.apply_move(sq(6, 4), sq(4, 4));
    assert_eq!(board.piece_id_at(sq(4, 4)), Some(id));
    assert_eq!(board.piece_id_at(sq(6, 4)), None);

    // A second move resolves the piece at its new coordinates, not the
    // ones it was created with.
    board.apply_move(sq(4, 4), sq(3, 4));
    assert_eq!(board.piece_id_at(sq(3, 4)), Some(id));
}

#[test]
fn captured_piece_id_is_dropped() {
    let mut board = Board::new();
    let attacker = board.piece_id_at(sq(6, 4)).unwrap();
    let victim = board.piece_id_at(sq(1, 4)).unwrap();
    assert_ne!(attacker, victim);

    board.apply_move(sq(6, 4), sq(1, 4));
    assert_eq!(board.piece_id_at(sq(1, 4)), Some(attacker));
    let all_ids: Vec<_> = Square::all().filter_map(|s| board.piece_id_at(s)).collect();
    assert!(!all_ids.contains(&victim));
}

#[test]
fn every_piece_gets_a_distinct_id() {
    let board = Board::new();
    let ids: Vec<_> = Square::all().filter_map(|s| board.piece_id_at(s)).collect();
    assert_eq!(ids.len(), 32);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 32);
}

#[test]
fn square_bounds_checking() {
    assert!(Square::checked(7, 7).is_some());
    assert!(Square::checked(8, 0).is_none());
    assert!(Square::checked(0, 8).is_none());
    assert_eq!(Square::try_from([6u8, 4]).unwrap(), sq(6, 4));
    assert!(Square::try_from([9u8, 0]).is_err());
}

#[test]
fn square_displays_algebraic() {
    assert_eq!(sq(6, 4).to_string(), "e2");
    assert_eq!(sq(0, 0).to_string(), "a8");
    assert_eq!(sq(7, 7).to_string(), "h1");
}
