//! Interface to an external UCI move-search process.
//!
//! Requests are the two lines `position fen <encoding>` and
//! `go depth <n>`; replies are parsed line by line into
//! [`EngineMessage`]s. Moves travel in long algebraic form (`e2e4`,
//! `e7e8q`).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Move, MoveParseError, Piece, Square};

pub mod command;
pub mod options;

pub use command::{parse_engine_line, EngineMessage, Score};
pub use options::{parse_setoption, EngineOptions, OptionChange};

/// Lines sent once after the process starts.
pub const HANDSHAKE: [&str; 2] = ["uci", "isready"];

/// A move in UCI long algebraic notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl FromStr for UciMove {
    type Err = MoveParseError;

    /// Parses `e2e4` or `e7e8q`; the promotion letter may be either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let invalid = || MoveParseError::InvalidSquare {
            notation: s.to_string(),
        };
        let from: Square = chars[0..2]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| invalid())?;
        let to: Square = chars[2..4]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| invalid())?;

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match Piece::from_char(c) {
                Some(p) if p.is_promotion_choice() => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        Ok(UciMove {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl From<Move> for UciMove {
    fn from(mv: Move) -> Self {
        UciMove {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

/// One analysis request: the position to search and how deep.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchRequest {
    pub fen: String,
    pub depth: u32,
}

impl SearchRequest {
    #[must_use]
    pub fn new(fen: impl Into<String>, depth: u32) -> Self {
        SearchRequest {
            fen: fen.into(),
            depth,
        }
    }

    #[must_use]
    pub fn position_command(&self) -> String {
        format!("position fen {}", self.fen)
    }

    #[must_use]
    pub fn go_command(&self) -> String {
        format!("go depth {}", self.depth)
    }

    /// The lines to write to the process, in order.
    #[must_use]
    pub fn commands(&self) -> [String; 2] {
        [self.position_command(), self.go_command()]
    }
}
