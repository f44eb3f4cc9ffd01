#![cfg(unix)]

use hexchess_core::{HexCoord, MoveRequest, Side};
use hexchess_engine::{EngineClient, EngineError, StdioEngine};

const SCRIPT: &str = r#"
while IFS= read -r line; do
  case "$line" in
    *get_board*) echo '{"result":{"4,9":"♔","6,0":"♚"}}' ;;
    *get_current_player_moves*) echo '{"result":{"4,9":["4,8"]}}' ;;
    *current_player*) echo '{"result":"W"}' ;;
    *is_in_check*) echo '{"result":true}' ;;
    *make_move*) echo '{"error":"illegal move"}' ;;
    *) echo '{"result":null}' ;;
  esac
done
"#;

fn scripted_engine() -> EngineClient<StdioEngine> {
    let engine = StdioEngine::spawn("sh", ["-c", SCRIPT]).expect("sh is available");
    EngineClient::new(engine)
}

fn coord(x: i64, y: i64) -> HexCoord {
    HexCoord::new(x, y).expect("valid coordinate")
}

#[test]
fn queries_round_trip_through_child_process() {
    let mut client = scripted_engine();

    client.create().expect("create succeeds");
    let board = client.board().expect("board parses");
    let moves = client.moves().expect("moves parse");

    assert_eq!(board.len(), 2);
    assert!(moves.allows(coord(4, 9), coord(4, 8)));
    assert!(client.is_in_check().expect("check parses"));
    assert_eq!(client.side_to_move().expect("side parses"), Side::White);
}

#[test]
fn engine_errors_surface_as_rejections() {
    let mut client = scripted_engine();

    let result = client.play(MoveRequest::new(coord(4, 9), coord(4, 8)));

    assert!(matches!(
        result,
        Err(EngineError::Rejected {
            operation: "make_move",
            ref message,
        }) if message == "illegal move"
    ));
}

#[test]
fn exited_engine_reports_closed() {
    let engine = StdioEngine::spawn("sh", ["-c", "exit 0"]).expect("sh is available");
    let mut client = EngineClient::new(engine);

    let error = client.board().expect_err("no reply from exited engine");

    assert!(
        matches!(error, EngineError::Closed | EngineError::Io(_)),
        "unexpected error: {error:?}"
    );
}

#[test]
fn missing_program_fails_to_spawn() {
    let result = StdioEngine::spawn("hexchess-engine-that-does-not-exist", Vec::<String>::new());

    assert!(matches!(result, Err(EngineError::Spawn(_))));
}
