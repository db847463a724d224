//! Standard Algebraic Notation (SAN) support.
//!
//! SAN is the notation used by game records: "e4", "Nf3", "Bxc6+", "O-O",
//! "e8=Q#". Imported records are resolved against the legal moves of the
//! position they are played from.
//!
//! # Examples
//! ```
//! use chess_rules::board::{Color, Position};
//!
//! let position = Position::new();
//! let mv = position.parse_san(Color::White, "Nf3").unwrap();
//! assert_eq!(position.move_to_san(&mv), "Nf3");
//! ```

use super::error::SanError;
use super::{CastleSide, Color, Move, Piece, Position, Square};

/// The pieces of a SAN token after the piece letter is taken off.
struct SanParts {
    piece: Piece,
    file: Option<usize>,
    rank: Option<usize>,
    dest: Square,
    promotion: Option<Piece>,
}

impl Position {
    /// Format a move in Standard Algebraic Notation.
    ///
    /// A pawn move onto the last rank without a chosen piece is written
    /// without the `=` suffix.
    #[must_use]
    pub fn move_to_san(&self, mv: &Move) -> String {
        let mut san = String::new();

        match mv.castle {
            Some(CastleSide::King) => san.push_str("O-O"),
            Some(CastleSide::Queen) => san.push_str("O-O-O"),
            None => {
                if mv.piece == Piece::Pawn {
                    if mv.is_capture() {
                        san.push(file_char(mv.from.1));
                    }
                } else {
                    san.push(mv.piece.to_char().to_ascii_uppercase());
                    let (needs_file, needs_rank) = self.needs_disambiguation(mv);
                    if needs_file {
                        san.push(file_char(mv.from.1));
                    }
                    if needs_rank {
                        san.push(rank_char(mv.from.0));
                    }
                }
                if mv.is_capture() {
                    san.push('x');
                }
                san.push_str(&mv.to.to_string());
                if let Some(promo) = mv.promotion {
                    san.push('=');
                    san.push(promo.to_char().to_ascii_uppercase());
                }
            }
        }

        if let Ok(after) = self.apply(mv) {
            let defender = mv.color.opponent();
            if after.is_checkmate(defender) {
                san.push('#');
            } else if after.is_in_check(defender) {
                san.push('+');
            }
        }

        san
    }

    /// Returns (`needs_file`, `needs_rank`) for a piece move.
    fn needs_disambiguation(&self, mv: &Move) -> (bool, bool) {
        let rivals: Vec<Move> = self
            .legal_moves(mv.color)
            .iter()
            .copied()
            .filter(|m| m.to == mv.to && m.piece == mv.piece && m.from != mv.from)
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let same_file = rivals.iter().any(|m| m.from.1 == mv.from.1);
        let same_rank = rivals.iter().any(|m| m.from.0 == mv.from.0);

        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }

    /// Resolve a SAN token to a legal move for `side`.
    ///
    /// Check markers and annotation glyphs are ignored. A pawn reaching the
    /// last rank without a `=X` suffix promotes to a queen.
    pub fn parse_san(&self, side: Color, san: &str) -> Result<Move, SanError> {
        let token = san.trim().trim_end_matches(['+', '#', '!', '?']);
        if token.is_empty() {
            return Err(SanError::Empty);
        }

        let castle = match token {
            "O-O" | "0-0" => Some(CastleSide::King),
            "O-O-O" | "0-0-0" => Some(CastleSide::Queen),
            _ => None,
        };
        if let Some(side_of_board) = castle {
            return self
                .legal_moves_from(CastleSide::king_home(side))
                .iter()
                .copied()
                .find(|m| m.castle == Some(side_of_board))
                .ok_or_else(|| SanError::NoMatchingMove {
                    san: san.to_string(),
                });
        }

        let parts = split_san(token)?;
        let matching: Vec<Move> = self
            .legal_moves(side)
            .iter()
            .copied()
            .filter(|m| {
                m.to == parts.dest
                    && m.piece == parts.piece
                    && !m.is_castling()
                    && parts.file.map_or(true, |f| m.from.1 == f)
                    && parts.rank.map_or(true, |r| m.from.0 == r)
            })
            .collect();

        let mv = match matching.as_slice() {
            [] => {
                return Err(SanError::NoMatchingMove {
                    san: san.to_string(),
                })
            }
            [only] => *only,
            _ => {
                return Err(SanError::AmbiguousMove {
                    san: san.to_string(),
                })
            }
        };

        if mv.reaches_promotion_rank() {
            Ok(mv.with_promotion(parts.promotion.unwrap_or(Piece::Queen)))
        } else {
            Ok(mv)
        }
    }
}

fn file_char(file: usize) -> char {
    (b'a' + file as u8) as char
}

fn rank_char(rank: usize) -> char {
    (b'1' + rank as u8) as char
}

/// Split `[Piece][file][rank][x]<dest>[=Promo]` into its parts.
fn split_san(token: &str) -> Result<SanParts, SanError> {
    let mut chars: Vec<char> = token.chars().filter(|&c| c != 'x' && c != ':').collect();

    let piece = match chars.first() {
        Some(&c) if c.is_ascii_uppercase() => {
            chars.remove(0);
            match Piece::from_char(c) {
                Some(p) if p != Piece::Pawn => p,
                _ => return Err(SanError::InvalidPiece { char: c }),
            }
        }
        _ => Piece::Pawn,
    };

    let mut promotion = None;
    if let Some(&last) = chars.last() {
        if last.is_ascii_uppercase() {
            chars.pop();
            if chars.last() == Some(&'=') {
                chars.pop();
            }
            let promo = Piece::from_char(last)
                .filter(|p| p.is_promotion_choice())
                .ok_or(SanError::InvalidPromotion { char: last })?;
            promotion = Some(promo);
        } else if last == '=' {
            return Err(SanError::InvalidPromotion { char: last });
        }
    }

    let invalid = || SanError::InvalidSquare {
        notation: token.to_string(),
    };
    if chars.len() < 2 || chars.len() > 4 {
        return Err(invalid());
    }
    let (prefix, dest_chars) = chars.split_at(chars.len() - 2);
    let dest: Square = dest_chars
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| invalid())?;

    let mut file = None;
    let mut rank = None;
    for &c in prefix {
        match c {
            'a'..='h' if file.is_none() && rank.is_none() => file = Some(c as usize - 'a' as usize),
            '1'..='8' if rank.is_none() => rank = Some(c as usize - '1' as usize),
            _ => return Err(invalid()),
        }
    }

    Ok(SanParts {
        piece,
        file,
        rank,
        dest,
        promotion,
    })
}
