use hexchess_board::{apply, query, Board};
use hexchess_core::{Command, HexCoord, MoveRequest, MovesIndex, VisualState};
use hexchess_system_selection::{Phase, Selection};

fn coord(x: i64, y: i64) -> HexCoord {
    HexCoord::new(x, y).expect("valid coordinate")
}

fn scenario_moves() -> MovesIndex {
    MovesIndex::from_entries([
        (coord(7, 5), vec![coord(8, 5), coord(6, 6)]),
        (coord(3, 3), Vec::new()),
    ])
}

fn click(
    selection: &mut Selection,
    board: &mut Board,
    cell: HexCoord,
    moves: &MovesIndex,
) -> Option<MoveRequest> {
    let mut commands = Vec::new();
    let confirmed = selection.handle(cell, moves, &mut commands);
    let mut events = Vec::new();
    for command in commands {
        apply(board, command, &mut events);
    }
    confirmed
}

fn visual(board: &Board, cell: HexCoord) -> VisualState {
    query::cell(board, cell).expect("bound cell").visual()
}

#[test]
fn selecting_highlights_destinations_and_reselecting_clears_them() {
    let mut selection = Selection::new();
    let mut board = Board::new();
    let moves = scenario_moves();

    assert_eq!(click(&mut selection, &mut board, coord(7, 5), &moves), None);

    assert_eq!(visual(&board, coord(7, 5)), VisualState::Selected);
    assert_eq!(visual(&board, coord(8, 5)), VisualState::Reachable);
    assert_eq!(visual(&board, coord(6, 6)), VisualState::Reachable);
    assert_eq!(
        query::cells_in_state(&board, VisualState::Default).len(),
        88,
        "only the selection and its destinations should be highlighted"
    );

    assert_eq!(click(&mut selection, &mut board, coord(7, 5), &moves), None);

    for cell in [coord(7, 5), coord(8, 5), coord(6, 6)] {
        assert_eq!(visual(&board, cell), VisualState::Default);
    }
    assert_eq!(selection.state().phase(), Phase::Idle);
}

#[test]
fn piece_without_moves_is_still_selectable() {
    let mut selection = Selection::new();
    let mut board = Board::new();
    let moves = scenario_moves();

    let _ = click(&mut selection, &mut board, coord(3, 3), &moves);

    assert_eq!(selection.state().selected(), Some(coord(3, 3)));
    assert_eq!(
        query::cells_in_state(&board, VisualState::Selected),
        vec![coord(3, 3)]
    );
    assert!(query::cells_in_state(&board, VisualState::Reachable).is_empty());
}

#[test]
fn switching_selection_drops_previous_highlights() {
    let mut selection = Selection::new();
    let mut board = Board::new();
    let moves = scenario_moves();

    let _ = click(&mut selection, &mut board, coord(7, 5), &moves);
    let _ = click(&mut selection, &mut board, coord(3, 3), &moves);

    assert_eq!(
        query::cells_in_state(&board, VisualState::Selected),
        vec![coord(3, 3)]
    );
    assert!(query::cells_in_state(&board, VisualState::Reachable).is_empty());
    assert_eq!(selection.state().last_selected(), Some(coord(7, 5)));
}

#[test]
fn clicking_listed_destination_returns_the_move_and_clears_highlights() {
    let mut selection = Selection::new();
    let moves = scenario_moves();
    let mut commands = Vec::new();

    let _ = selection.handle(coord(7, 5), &moves, &mut commands);
    commands.clear();
    let confirmed = selection.handle(coord(8, 5), &moves, &mut commands);

    assert_eq!(confirmed, Some(MoveRequest::new(coord(7, 5), coord(8, 5))));
    assert_eq!(commands, vec![Command::ResetVisuals]);
    assert_eq!(selection.state().phase(), Phase::Idle);
}

#[test]
fn destination_of_another_piece_does_not_confirm() {
    let mut selection = Selection::new();
    let moves = MovesIndex::from_entries([
        (coord(7, 5), vec![coord(8, 5)]),
        (coord(2, 6), vec![coord(2, 7)]),
    ]);
    let mut commands = Vec::new();

    let _ = selection.handle(coord(7, 5), &moves, &mut commands);
    let confirmed = selection.handle(coord(2, 7), &moves, &mut commands);

    assert_eq!(confirmed, None);
    assert_eq!(selection.state().selected(), Some(coord(2, 7)));
    assert!(commands.contains(&Command::SetVisual {
        cell: coord(2, 7),
        state: VisualState::Selected,
    }));
}
