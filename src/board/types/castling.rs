//! Castling side type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

/// Which wing a castling move goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    King,
    Queen,
}

/// File the king starts on
pub(crate) const KING_HOME_FILE: usize = 4;

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// File of the rook that castles on this side
    #[inline]
    #[must_use]
    pub const fn rook_home_file(self) -> usize {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// File the rook lands on
    #[inline]
    #[must_use]
    pub const fn rook_target_file(self) -> usize {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// File the king lands on
    #[inline]
    #[must_use]
    pub const fn king_target_file(self) -> usize {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// Files strictly between the king and the rook
    #[must_use]
    pub const fn between_files(self) -> &'static [usize] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        }
    }

    /// Infer the castling side from a king move, if it is a two-file king step
    /// off the home square.
    #[must_use]
    pub fn from_king_move(from: Square, to: Square) -> Option<CastleSide> {
        if from.1 != KING_HOME_FILE || from.0 != to.0 {
            return None;
        }
        match to.1 {
            6 => Some(CastleSide::King),
            2 => Some(CastleSide::Queen),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn king_home(color: Color) -> Square {
        Square(color.back_rank(), KING_HOME_FILE)
    }

    #[inline]
    #[must_use]
    pub const fn rook_home(self, color: Color) -> Square {
        Square(color.back_rank(), self.rook_home_file())
    }

    #[inline]
    #[must_use]
    pub const fn rook_target(self, color: Color) -> Square {
        Square(color.back_rank(), self.rook_target_file())
    }

    #[inline]
    #[must_use]
    pub const fn king_target(self, color: Color) -> Square {
        Square(color.back_rank(), self.king_target_file())
    }

    /// Board-encoding letter for this right (uppercase for White)
    #[must_use]
    pub fn fen_char(self, color: Color) -> char {
        let c = match self {
            CastleSide::King => 'k',
            CastleSide::Queen => 'q',
        };
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}
