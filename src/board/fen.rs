use std::str::FromStr;

use super::error::FenError;
use super::{CastleSide, Color, Piece, Position, Square};

/// Starting position in board-encoding form
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The fullmove field of an encoding; 1 when absent or unreadable.
#[must_use]
pub fn fullmove_number(fen: &str) -> u32 {
    fen.split_whitespace()
        .nth(5)
        .and_then(|field| field.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Parse a board encoding into a position and the side to move.
///
/// Only the placement, side-to-move and castling fields are read. The
/// castling field decides the `moved` flag of kings and rooks on their home
/// squares: a right that is absent marks its rook (and, when both rights of
/// a color are absent, its king) as moved. A missing castling field grants
/// every right the placement allows. En-passant and clock fields are ignored.
pub fn parse_fen(fen: &str) -> Result<(Position, Color), FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(FenError::TooFewParts { found: parts.len() });
    }

    let mut position = parse_placement(parts[0])?;

    let side = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };

    let rights = match parts.get(2) {
        Some(field) => parse_castling(field)?,
        None => [[true; 2]; 2],
    };
    for color in Color::BOTH {
        let [king_side, queen_side] = rights[color.index()];
        mark_home_piece(
            &mut position,
            CastleSide::king_home(color),
            color,
            Piece::King,
            king_side || queen_side,
        );
        mark_home_piece(
            &mut position,
            CastleSide::King.rook_home(color),
            color,
            Piece::Rook,
            king_side,
        );
        mark_home_piece(
            &mut position,
            CastleSide::Queen.rook_home(color),
            color,
            Piece::Rook,
            queen_side,
        );
    }

    for color in Color::BOTH {
        let found = position.count(color, Piece::King);
        if found != 1 {
            return Err(FenError::KingCount { color, found });
        }
    }

    Ok((position, side))
}

fn parse_placement(field: &str) -> Result<Position, FenError> {
    let mut position = Position::empty();
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0;
        for c in rank_str.chars() {
            if let Some(run) = c.to_digit(10) {
                file += run as usize;
                continue;
            }
            let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            if file >= 8 {
                return Err(FenError::RankLength {
                    rank: rank + 1,
                    files: file + 1,
                });
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            // Pawns off their start rank have necessarily moved
            let moved = piece == Piece::Pawn && rank != color.pawn_start_rank();
            position.set_piece(Square(rank, file), color, piece, moved);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::RankLength {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(position)
}

/// Castling rights indexed `[color][side]`, king side first.
fn parse_castling(field: &str) -> Result<[[bool; 2]; 2], FenError> {
    let mut rights = [[false; 2]; 2];
    for c in field.chars() {
        match c {
            'K' => rights[0][0] = true,
            'Q' => rights[0][1] = true,
            'k' => rights[1][0] = true,
            'q' => rights[1][1] = true,
            '-' => {}
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn mark_home_piece(position: &mut Position, sq: Square, color: Color, piece: Piece, unmoved: bool) {
    if position.piece_at(sq) == Some((color, piece)) {
        position.set_piece(sq, color, piece, !unmoved);
    }
}

impl Position {
    /// Parse a position from a board encoding, discarding the side to move.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen).map(|(position, _)| position)
    }

    /// Parse a position from a board encoding.
    ///
    /// # Panics
    /// Panics if the encoding is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid board encoding")
    }

    /// The placement field: ranks 8 to 1 separated by `/`, digits for runs
    /// of empty squares.
    #[must_use]
    pub fn placement(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        rows.join("/")
    }

    /// Castling field derived from the `moved` flags: a right is listed when
    /// the king and that rook both stand unmoved on their home squares.
    #[must_use]
    pub fn castling_field(&self) -> String {
        let mut field = String::new();
        for color in Color::BOTH {
            let king_home = self
                .occupant(CastleSide::king_home(color))
                .is_some_and(|p| p.color == color && p.piece == Piece::King && !p.moved);
            if !king_home {
                continue;
            }
            for side in CastleSide::BOTH {
                let rook_home = self
                    .occupant(side.rook_home(color))
                    .is_some_and(|p| p.color == color && p.piece == Piece::Rook && !p.moved);
                if rook_home {
                    field.push(side.fen_char(color));
                }
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }

    /// Full six-field encoding with the given side to move and move number.
    ///
    /// En-passant is always `-` and the halfmove clock always `0`; neither is
    /// tracked.
    #[must_use]
    pub fn encode(&self, side_to_move: Color, fullmove: u32) -> String {
        format!(
            "{} {} {} - 0 {}",
            self.placement(),
            side_to_move.fen_char(),
            self.castling_field(),
            fullmove.max(1)
        )
    }

    /// Encoding with move number 1, for a position outside any game.
    #[must_use]
    pub fn to_fen(&self, side_to_move: Color) -> String {
        self.encode(side_to_move, 1)
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_fen(s)
    }
}
