//! Lines coming back from the external search process.

use std::fmt;

use log::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::UciMove;
use crate::board::{Color, GameError};

/// Evaluation reported by the search process, from the point of view of
/// the side to move in the searched position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Score {
    Centipawns(i32),
    /// Moves to mate; negative when the side to move is being mated
    Mate(i32),
}

impl Score {
    /// The same score seen from White's side.
    #[must_use]
    pub const fn for_white(self, side_to_move: Color) -> Score {
        match (side_to_move, self) {
            (Color::White, score) => score,
            (Color::Black, Score::Centipawns(cp)) => Score::Centipawns(-cp),
            (Color::Black, Score::Mate(n)) => Score::Mate(-n),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Centipawns(cp) => write!(f, "{:+.2}", f64::from(*cp) / 100.0),
            Score::Mate(n) => write!(f, "#{n}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngineMessage {
    UciOk,
    ReadyOk,
    /// `info ...`; either field may be absent
    Info {
        depth: Option<u32>,
        score: Option<Score>,
    },
    /// `bestmove <move>`; `None` when the process reports no move
    BestMove(Option<UciMove>),
    Unknown(String),
}

/// Parse one output line. Blank lines yield `Ok(None)`.
///
/// A `bestmove` whose move text does not parse is an error; anything else
/// unrecognised comes back as [`EngineMessage::Unknown`].
pub fn parse_engine_line(line: &str) -> Result<Option<EngineMessage>, GameError> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&keyword) = parts.first() else {
        return Ok(None);
    };

    let message = match keyword {
        "uciok" => EngineMessage::UciOk,
        "readyok" => EngineMessage::ReadyOk,
        "info" => parse_info(&parts[1..]),
        "bestmove" => EngineMessage::BestMove(parse_bestmove(parts.get(1).copied())?),
        _ => {
            trace!("unrecognised engine line: {trimmed}");
            EngineMessage::Unknown(trimmed.to_string())
        }
    };
    Ok(Some(message))
}

fn parse_bestmove(text: Option<&str>) -> Result<Option<UciMove>, GameError> {
    match text {
        None | Some("(none)" | "0000") => Ok(None),
        Some(text) => text.parse::<UciMove>().map(Some).map_err(|error| {
            warn!("engine sent malformed bestmove '{text}': {error}");
            GameError::MalformedExternalMove {
                notation: text.to_string(),
                error,
            }
        }),
    }
}

fn parse_info(parts: &[&str]) -> EngineMessage {
    let mut depth = None;
    let mut score = None;
    let mut iter = parts.iter();

    while let Some(&token) = iter.next() {
        match token {
            "depth" => depth = iter.next().and_then(|v| v.parse::<u32>().ok()),
            "score" => {
                let kind = iter.next().copied();
                let value = iter.next().and_then(|v| v.parse::<i32>().ok());
                score = match (kind, value) {
                    (Some("cp"), Some(cp)) => Some(Score::Centipawns(cp)),
                    (Some("mate"), Some(n)) => Some(Score::Mate(n)),
                    _ => {
                        warn!("ignoring unreadable score in info line");
                        None
                    }
                };
            }
            // Everything after `pv` is the line itself.
            "pv" | "string" => break,
            _ => {}
        }
    }

    EngineMessage::Info { depth, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MoveParseError, Square};

    #[test]
    fn test_handshake_replies() {
        assert_eq!(parse_engine_line("uciok"), Ok(Some(EngineMessage::UciOk)));
        assert_eq!(parse_engine_line(" readyok \n"), Ok(Some(EngineMessage::ReadyOk)));
        assert_eq!(parse_engine_line("   "), Ok(None));
    }

    #[test]
    fn test_info_with_centipawn_score() {
        let line = "info depth 14 seldepth 20 multipv 1 score cp -35 nodes 1234 pv e7e5 g1f3";
        assert_eq!(
            parse_engine_line(line),
            Ok(Some(EngineMessage::Info {
                depth: Some(14),
                score: Some(Score::Centipawns(-35)),
            }))
        );
    }

    #[test]
    fn test_info_with_mate_score() {
        let line = "info depth 5 score mate 3 pv d1h5";
        assert_eq!(
            parse_engine_line(line),
            Ok(Some(EngineMessage::Info {
                depth: Some(5),
                score: Some(Score::Mate(3)),
            }))
        );
        assert_eq!(
            parse_engine_line("info string score cp 10"),
            Ok(Some(EngineMessage::Info {
                depth: None,
                score: None
            }))
        );
    }

    #[test]
    fn test_bestmove() {
        let Ok(Some(EngineMessage::BestMove(Some(mv)))) =
            parse_engine_line("bestmove e2e4 ponder e7e5")
        else {
            panic!("expected a best move");
        };
        assert_eq!(mv.from, Square(1, 4));
        assert_eq!(mv.to, Square(3, 4));

        assert_eq!(
            parse_engine_line("bestmove (none)"),
            Ok(Some(EngineMessage::BestMove(None)))
        );
    }

    #[test]
    fn test_malformed_bestmove() {
        assert_eq!(
            parse_engine_line("bestmove e2"),
            Err(GameError::MalformedExternalMove {
                notation: "e2".to_string(),
                error: MoveParseError::InvalidLength { len: 2 },
            })
        );
    }

    #[test]
    fn test_unknown_line() {
        assert_eq!(
            parse_engine_line("id name Stockfish"),
            Ok(Some(EngineMessage::Unknown("id name Stockfish".to_string())))
        );
    }

    #[test]
    fn test_score_perspective_and_display() {
        assert_eq!(Score::Centipawns(35).for_white(Color::Black), Score::Centipawns(-35));
        assert_eq!(Score::Mate(-2).for_white(Color::Black), Score::Mate(2));
        assert_eq!(Score::Centipawns(35).to_string(), "+0.35");
        assert_eq!(Score::Centipawns(-120).to_string(), "-1.20");
        assert_eq!(Score::Mate(3).to_string(), "#3");
    }
}
