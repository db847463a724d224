//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::castling::CastleSide;
use super::piece::{Color, Piece};
use super::square::Square;

/// A single ply.
///
/// `piece` is the kind that left `from` (a promoting pawn stays `Pawn` here;
/// the new kind lives in `promotion`). `captured` is filled in by move
/// generation and is only a hint for moves that come from outside.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub color: Color,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub promotion: Option<Piece>,
}

impl Move {
    /// Create a quiet move (no capture, no special flags)
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: Piece, color: Color) -> Self {
        Move {
            from,
            to,
            piece,
            color,
            captured: None,
            castle: None,
            promotion: None,
        }
    }

    /// Create a castling king move for `color`
    #[must_use]
    pub const fn castling(color: Color, side: CastleSide) -> Self {
        Move {
            from: CastleSide::king_home(color),
            to: side.king_target(color),
            piece: Piece::King,
            color,
            captured: None,
            castle: Some(side),
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_capture(mut self, captured: Piece) -> Self {
        self.captured = Some(captured);
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }

    /// Returns true if this move captures a piece
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if this move is castling (kingside or queenside)
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.castle.is_some()
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Returns true if this is a pawn arriving on its last rank
    #[inline]
    #[must_use]
    pub fn reaches_promotion_rank(self) -> bool {
        matches!(self.piece, Piece::Pawn) && self.to.0 == self.color.pawn_promotion_rank()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Move({} {} {}{}",
            self.color,
            self.piece,
            self.from,
            self.to
        )?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured {
            write!(f, " x{captured}")?;
        }
        if self.castle.is_some() {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

/// UCI long algebraic form (`e2e4`, `e7e8q`)
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const EMPTY_MOVE: Move = Move::new(Square(0, 0), Square(0, 0), Piece::Pawn, Color::White);

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    /// Keep only the moves matching `keep`, preserving order
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            if keep(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    pub(crate) fn extend_from(&mut self, other: &MoveList) {
        for mv in other.iter() {
            self.push(*mv);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        if idx < self.len {
            Some(self.moves[idx])
        } else {
            None
        }
    }

    /// The move landing on `to`, if any
    #[must_use]
    pub fn find_to(&self, to: Square) -> Option<Move> {
        self.iter().copied().find(|m| m.to == to)
    }

    /// Destination squares in generation order
    #[must_use]
    pub fn destinations(&self) -> Vec<Square> {
        self.iter().map(|m| m.to).collect()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for MoveList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MoveList {}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}
