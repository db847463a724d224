use std::env;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::sync::Arc;
use std::thread;

use log::{error, warn};
use parking_lot::Mutex;

use chess_rules::board::{Piece, Square};
use chess_rules::engine::{Dispatch, Session, SessionEvent, SharedSession};
use chess_rules::game::{import_uci_moves, parse_movetext, record_moves, GameState, SelectOutcome};
use chess_rules::uci::{parse_setoption, EngineOptions, HANDSHAKE};

type EngineInput = Arc<Mutex<ChildStdin>>;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("CHESS_RULES_LOG", "warn"))
        .init();
}

fn send(input: &EngineInput, lines: &[String]) {
    let mut stdin = input.lock();
    for line in lines {
        if let Err(e) = writeln!(stdin, "{line}") {
            error!("failed to write to engine: {e}");
            return;
        }
    }
    let _ = stdin.flush();
}

fn dispatch(engine: Option<&EngineInput>, request: Option<Dispatch>) {
    if let (Some(input), Some(request)) = (engine, request) {
        send(input, &request.lines());
    }
}

/// Start the search process and a thread feeding its output into the
/// session.
fn spawn_engine(path: &str, session: &SharedSession) -> io::Result<EngineInput> {
    let mut child = Command::new(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin unavailable"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdout unavailable"))?;

    let input: EngineInput = Arc::new(Mutex::new(stdin));
    send(&input, &HANDSHAKE.map(str::to_string));

    let session = Arc::clone(session);
    let writer = Arc::clone(&input);
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            let mut session = session.lock();
            match session.handle_engine_line(&line) {
                Ok(Some(SessionEvent::Evaluation { score, depth })) => {
                    println!("eval {score} (depth {})", depth.unwrap_or(0));
                }
                Ok(Some(SessionEvent::Played(mv))) => {
                    println!("engine plays {mv}");
                    println!("{}", session.game().position());
                    dispatch(Some(&writer), session.sync());
                }
                Ok(Some(SessionEvent::Suggested(best))) => println!("hint {best}"),
                Ok(Some(SessionEvent::NoMove)) => println!("engine has no move"),
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            }
        }
        let _ = child.wait();
    });

    Ok(input)
}

fn print_select(outcome: &SelectOutcome) {
    match outcome {
        SelectOutcome::Ignored => println!("nothing to select"),
        SelectOutcome::Selected {
            square,
            destinations,
        } => {
            let targets: Vec<String> = destinations.iter().map(Square::to_string).collect();
            println!("{square}: {}", targets.join(" "));
        }
        SelectOutcome::Deselected => println!("deselected"),
        SelectOutcome::Moved(mv) => println!("played {mv}"),
        SelectOutcome::PromotionRequired { square } => {
            println!("pawn on {square} promotes: promote <q|r|b|n> or cancel");
        }
    }
}

fn print_status(game: &GameState) {
    println!("{}", game.position());
    println!("{} to move, ply {}/{}", game.side_to_move(), game.cursor(), game.history().len());
    let captured: Vec<String> = game.ledger().iter().map(ToString::to_string).collect();
    if !captured.is_empty() {
        println!("captured: {}", captured.join(", "));
    }
    println!("{:?}", game.outcome());
}

/// Run one command line. Returns `false` on `quit`.
fn run_command(session: &mut Session, parts: &[&str]) -> bool {
    let game = session.game_mut();
    let result = match parts[0] {
        "select" | "s" => match parts.get(1).map(|s| s.parse::<Square>()) {
            Some(Ok(square)) => game.select(square).map(|o| print_select(&o)),
            _ => {
                println!("usage: select <square>");
                Ok(())
            }
        },
        "next" => game.step_forward().map(|mv| println!("forward {mv}")),
        "prev" => game.step_backward().map(|mv| println!("back {mv}")),
        "reset" => {
            game.reset_to_initial();
            Ok(())
        }
        "promote" => match parts.get(1).and_then(|s| s.chars().next()).and_then(Piece::from_char) {
            Some(piece) => game.choose_promotion(piece).map(|mv| println!("played {mv}")),
            None => {
                println!("usage: promote <q|r|b|n>");
                Ok(())
            }
        },
        "cancel" => game.cancel_promotion().map(|mv| println!("cancelled {mv}")),
        "import" => {
            let start = GameState::new();
            match import_uci_moves(start.position(), &parts[1..]) {
                Ok(record) => {
                    game.reset_to_initial();
                    game.load_external_move_list(record_moves(&record));
                    println!("imported {} moves; use next/prev", record.len());
                }
                Err(e) => println!("import failed: {e}"),
            }
            Ok(())
        }
        "movetext" => {
            let start = GameState::new();
            let text = parts[1..].join(" ");
            match parse_movetext(start.position(), start.side_to_move(), &text) {
                Ok(record) => {
                    game.reset_to_initial();
                    game.load_external_move_list(record_moves(&record));
                    println!("imported {} moves; use next/prev", record.len());
                }
                Err(e) => println!("import failed: {e}"),
            }
            Ok(())
        }
        "opponent" => {
            let value = parts.get(1).copied().map(|v| if v == "off" { "none" } else { v });
            session.set_option("opponent", value);
            Ok(())
        }
        "depth" => {
            session.set_option("depth", parts.get(1).copied());
            Ok(())
        }
        "setoption" => {
            if let Some((name, value)) = parse_setoption(parts) {
                session.set_option(&name, value.as_deref());
            }
            Ok(())
        }
        "options" => {
            for line in session.options().describe() {
                println!("{line}");
            }
            Ok(())
        }
        "fen" => {
            println!("{}", game.fen());
            Ok(())
        }
        "show" => {
            print_status(game);
            Ok(())
        }
        "quit" => return false,
        other => {
            println!("unknown command: {other}");
            Ok(())
        }
    };
    if let Err(e) = result {
        println!("error: {e}");
    }
    true
}

fn main() {
    init_logging();

    let mut options = EngineOptions::default();
    if let Some(path) = env::args().nth(1) {
        options.engine_path = Some(path);
    }
    let engine_path = options.engine_path.clone();
    let session = Session::new(GameState::new(), options).into_shared();

    let engine = engine_path.and_then(|path| match spawn_engine(&path, &session) {
        Ok(input) => Some(input),
        Err(e) => {
            error!("cannot start engine '{path}': {e}");
            None
        }
    });

    dispatch(engine.as_ref(), session.lock().sync());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let mut session = session.lock();
        if !run_command(&mut session, &parts) {
            break;
        }
        dispatch(engine.as_ref(), session.sync());
    }

    if let Some(input) = engine {
        send(&input, &["quit".to_string()]);
    }
}
