//! Pieces taken off the board, tagged with the ply that took them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{BoardPiece, Color};

/// A captured piece and the zero-based ply index of the capturing move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapturedPiece {
    pub piece: BoardPiece,
    pub ply: usize,
}

impl fmt::Display for CapturedPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ply {})", self.piece, self.ply + 1)
    }
}

/// Captures in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedLedger {
    entries: Vec<CapturedPiece>,
}

impl CapturedLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, piece: BoardPiece, ply: usize) {
        self.entries.push(CapturedPiece { piece, ply });
    }

    /// Drops every capture made at `ply` or later, returning how many went.
    pub(crate) fn forget_from(&mut self, ply: usize) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.ply < ply);
        before - self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CapturedPiece> {
        self.entries.iter()
    }

    /// The capture made at `ply`, if that move took something.
    #[must_use]
    pub fn at_ply(&self, ply: usize) -> Option<&CapturedPiece> {
        self.entries.iter().find(|entry| entry.ply == ply)
    }

    /// Pieces of `color` that have been lost.
    pub fn lost_by(&self, color: Color) -> impl Iterator<Item = &CapturedPiece> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.piece.color == color)
    }
}

impl<'a> IntoIterator for &'a CapturedLedger {
    type Item = &'a CapturedPiece;
    type IntoIter = std::slice::Iter<'a, CapturedPiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
