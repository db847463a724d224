//! The external search process interface, from request text to applied
//! moves, plus a smoke test of the command-line binary.

use std::io::{Read, Write};
use std::process::{Command, Stdio};

use chess_rules::board::{Color, Piece, Square};
use chess_rules::engine::{Session, SessionEvent};
use chess_rules::game::GameState;
use chess_rules::uci::{parse_engine_line, EngineMessage, EngineOptions, Score, UciMove};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn session_against(opponent: Color) -> Session {
    let mut options = EngineOptions::default();
    options.apply_setoption("opponent", Some(&opponent.to_string()));
    options.apply_setoption("depth", Some("10"));
    Session::new(GameState::new(), options)
}

#[test]
fn request_text_matches_position() {
    let mut session = session_against(Color::Black);
    let dispatch = session.sync().unwrap();
    assert_eq!(
        dispatch.lines(),
        vec![
            "position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
            "go depth 10".to_string(),
        ]
    );
}

#[test]
fn engine_plays_its_side_until_promotion() {
    let game = GameState::from_fen("k7/8/8/8/8/8/p7/7K w - - 0 1").unwrap();
    let mut options = EngineOptions::default();
    options.opponent = Some(Color::Black);
    let mut session = Session::new(game, options);

    session.game_mut().play_move(sq("h1"), sq("g1")).unwrap();
    let request = session.sync().unwrap().request;
    assert!(request.fen.ends_with(" b - - 0 1"));

    let event = session.handle_engine_line("bestmove a2a1r").unwrap();
    let Some(SessionEvent::Played(mv)) = event else {
        panic!("engine move should be applied, got {event:?}");
    };
    assert_eq!(mv.promotion, Some(Piece::Rook));
    assert_eq!(
        session.game().position().piece_at(sq("a1")),
        Some((Color::Black, Piece::Rook))
    );
    assert_eq!(session.game().side_to_move(), Color::White);
}

#[test]
fn navigation_invalidates_pending_search() {
    let mut session = session_against(Color::White);
    session.sync();
    session.game_mut().play_move(sq("e2"), sq("e4")).unwrap();
    session.game_mut().step_backward().unwrap();

    // Back at the searched position, so the reply is current again.
    let event = session.handle_engine_line("info depth 3 score mate -2").unwrap();
    assert_eq!(
        event,
        Some(SessionEvent::Evaluation {
            score: Score::Mate(-2),
            depth: Some(3)
        })
    );

    session.game_mut().step_forward().unwrap();
    assert_eq!(session.handle_engine_line("bestmove d2d4").unwrap(), None);
    assert_eq!(session.game().cursor(), 1);
}

#[test]
fn no_search_once_game_is_over() {
    let mut session = session_against(Color::Black);
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        session.game_mut().play_move(sq(from), sq(to)).unwrap();
    }
    assert_eq!(session.sync(), None);
    assert!(!session.tracker().is_searching());
}

#[test]
fn engine_output_parsing() {
    assert_eq!(
        parse_engine_line("info depth 20 score cp 15 nodes 100 pv e2e4"),
        Ok(Some(EngineMessage::Info {
            depth: Some(20),
            score: Some(Score::Centipawns(15))
        }))
    );
    let best: UciMove = "e7e8q".parse().unwrap();
    assert_eq!(
        parse_engine_line("bestmove e7e8q ponder a2a3"),
        Ok(Some(EngineMessage::BestMove(Some(best))))
    );
    assert_eq!(best.to_string(), "e7e8q");
    assert!(parse_engine_line("bestmove e7e8x").is_err());
}

#[test]
fn cli_smoke_test() {
    let exe = env!("CARGO_BIN_EXE_chess_rules");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn binary");

    let mut stdin = child.stdin.take().unwrap();
    stdin
        .write_all(b"select e2\nselect e4\nselect d7\nselect d5\nselect e4\nselect d5\nfen\nquit\n")
        .unwrap();
    drop(stdin);

    let mut output = String::new();
    child.stdout.take().unwrap().read_to_string(&mut output).unwrap();
    let status = child.wait().unwrap();
    assert!(status.success());
    assert!(output.contains("e2: e3 e4"), "output was:\n{output}");
    assert!(output.contains("rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2"));
}

#[test]
fn cli_log_level_from_environment() {
    let exe = env!("CARGO_BIN_EXE_chess_rules");
    let mut child = Command::new(exe)
        .env("CHESS_RULES_LOG", "debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"select e2\nselect e4\nquit\n").unwrap();
    drop(stdin);

    let mut logs = String::new();
    child.stderr.take().unwrap().read_to_string(&mut logs).unwrap();
    assert!(child.wait().unwrap().success());
    assert!(logs.contains("played"), "stderr was:\n{logs}");
    assert!(logs.contains("DEBUG"), "stderr was:\n{logs}");
}

#[cfg(feature = "serde")]
#[test]
fn options_load_from_json() {
    let data = r#"{ "search_depth": 18, "opponent": "Black", "engine_path": "/usr/bin/stockfish" }"#;
    let options: EngineOptions = serde_json::from_str(data).expect("invalid options json");
    assert_eq!(options.search_depth, 18);
    assert_eq!(options.opponent, Some(Color::Black));

    let saved = serde_json::to_string(&options).unwrap();
    let reloaded: EngineOptions = serde_json::from_str(&saved).unwrap();
    assert_eq!(reloaded, options);
}
