use log::trace;

use super::{Color, Move, MoveList, Position, Square};

impl Position {
    /// True when the king of `color` stands on a square the opponent attacks.
    ///
    /// A side without a king is never in check; that only happens in
    /// hand-built positions.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.attacked_squares(color.opponent()).contains(king_sq),
            None => false,
        }
    }

    /// Pseudo-legal moves from `from` that do not leave the mover's own king
    /// attacked once played.
    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = self.pseudo_moves_from(from);
        if moves.is_empty() {
            return moves;
        }
        let mut scratch = self.clone();
        moves.retain(|m| scratch.keeps_king_safe(m));
        moves
    }

    /// Every legal move for `color`, grouped by origin square.
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = self.pseudo_moves(color);
        let mut scratch = self.clone();
        moves.retain(|m| scratch.keeps_king_safe(m));
        moves
    }

    #[must_use]
    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces(color)
            .any(|piece| !self.legal_moves_from(piece.square).is_empty())
    }

    #[must_use]
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    #[must_use]
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Plays `m`, tests the mover's king, and takes the move back.
    fn keeps_king_safe(&mut self, m: &Move) -> bool {
        match self.make_move(m) {
            Ok(info) => {
                let safe = !self.is_in_check(m.color);
                self.unmake_move(m, info);
                if !safe {
                    trace!("{m:?} leaves the king attacked");
                }
                safe
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PositionBuilder};

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let position = PositionBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(1, 4), Color::White, Piece::Bishop)
            .piece(Square(7, 4), Color::Black, Piece::Rook)
            .piece(Square(7, 0), Color::Black, Piece::King)
            .build();
        assert!(position.legal_moves_from(Square(1, 4)).is_empty());
        assert!(!position.pseudo_moves_from(Square(1, 4)).is_empty());
    }

    #[test]
    fn test_check_detection() {
        let position = PositionBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(4, 4), Color::Black, Piece::Queen)
            .piece(Square(7, 0), Color::Black, Piece::King)
            .build();
        assert!(position.is_in_check(Color::White));
        assert!(!position.is_in_check(Color::Black));
    }
}
