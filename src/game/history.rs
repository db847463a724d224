//! Recorded moves plus the cursor marking how many are applied.

use crate::board::{Move, Piece, UnmakeInfo};

/// Ordered ply list with a cursor.
///
/// The first `cursor()` moves are applied to the game's position; each of
/// them has the [`UnmakeInfo`] needed to take it back. Moves past the cursor
/// are the redo tail, replayed by stepping forward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
    applied: Vec<UnmakeInfo>,
}

impl MoveHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A history holding `moves` with none of them applied.
    #[must_use]
    pub fn from_moves(moves: Vec<Move>) -> Self {
        MoveHistory {
            moves,
            applied: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.applied.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Every recorded move, applied or not.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The moves currently applied to the position.
    #[must_use]
    pub fn applied_moves(&self) -> &[Move] {
        &self.moves[..self.cursor()]
    }

    /// The move a step forward would apply.
    #[must_use]
    pub fn next_move(&self) -> Option<Move> {
        self.moves.get(self.cursor()).copied()
    }

    /// The most recently applied move.
    #[must_use]
    pub fn last_applied(&self) -> Option<Move> {
        self.cursor().checked_sub(1).map(|idx| self.moves[idx])
    }

    /// Records a new move at the cursor, dropping the redo tail.
    pub(crate) fn push(&mut self, mv: Move, info: UnmakeInfo) {
        self.moves.truncate(self.cursor());
        self.moves.push(mv);
        self.applied.push(info);
    }

    /// Marks the move at the cursor as applied.
    pub(crate) fn advance(&mut self, info: UnmakeInfo) {
        debug_assert!(self.cursor() < self.len(), "advance past end of history");
        self.applied.push(info);
    }

    /// Un-applies the last applied move, keeping it in the redo tail.
    pub(crate) fn retreat(&mut self) -> Option<(Move, UnmakeInfo)> {
        let info = self.applied.pop()?;
        Some((self.moves[self.applied.len()], info))
    }

    /// Removes the last applied move entirely, redo tail included.
    pub(crate) fn discard_last(&mut self) -> Option<(Move, UnmakeInfo)> {
        let (mv, info) = self.retreat()?;
        self.moves.truncate(self.cursor());
        Some((mv, info))
    }

    /// Stores the chosen promotion piece on the last applied move.
    pub(crate) fn set_last_promotion(&mut self, piece: Piece) {
        if let Some(idx) = self.cursor().checked_sub(1) {
            self.moves[idx].promotion = Some(piece);
        }
    }
}
