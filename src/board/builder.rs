//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing board encodings.
//!
//! # Example
//! ```
//! use chess_rules::board::{Color, Piece, PositionBuilder, Square};
//!
//! let (position, side) = PositionBuilder::new()
//!     .piece(Square(0, 4), Color::White, Piece::King)
//!     .piece(Square(7, 4), Color::Black, Piece::King)
//!     .piece(Square(1, 0), Color::White, Piece::Pawn)
//!     .side_to_move(Color::Black)
//!     .build_with_side();
//! assert_eq!(side, Color::Black);
//! assert_eq!(position.pieces(Color::White).count(), 2);
//! ```

use super::{Color, Piece, Position, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Color, Piece, bool)>,
    side_to_move: Color,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty position builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let position = Position::new();
        let mut builder = Self::new();
        for color in Color::BOTH {
            for p in position.pieces(color) {
                builder.pieces.push((p.square, p.color, p.piece, p.moved));
            }
        }
        builder
    }

    /// Place an unmoved piece, replacing whatever stood there.
    #[must_use]
    pub fn piece(self, square: Square, color: Color, piece: Piece) -> Self {
        self.place(square, color, piece, false)
    }

    /// Place a piece that counts as having moved (no castling with it).
    #[must_use]
    pub fn moved_piece(self, square: Square, color: Color, piece: Piece) -> Self {
        self.place(square, color, piece, true)
    }

    fn place(mut self, square: Square, color: Color, piece: Piece, moved: bool) -> Self {
        self.pieces.retain(|(sq, ..)| *sq != square);
        self.pieces.push((square, color, piece, moved));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, ..)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Build the position.
    #[must_use]
    pub fn build(self) -> Position {
        self.build_with_side().0
    }

    /// Build the position together with the side to move.
    #[must_use]
    pub fn build_with_side(self) -> (Position, Color) {
        let mut position = Position::empty();
        for (square, color, piece, moved) in self.pieces {
            position.set_piece(square, color, piece, moved);
        }
        (position, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let built = PositionBuilder::starting_position().build();
        assert_eq!(built, Position::new());
    }

    #[test]
    fn test_empty_board() {
        let position = PositionBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(7, 4), Color::Black, Piece::King)
            .build();

        assert!(position.piece_at(Square(0, 4)).is_some());
        assert!(position.piece_at(Square(7, 4)).is_some());
        assert!(position.piece_at(Square(0, 0)).is_none());
    }

    #[test]
    fn test_moved_piece_drops_castling() {
        let position = PositionBuilder::new()
            .piece(Square(0, 4), Color::White, Piece::King)
            .piece(Square(0, 7), Color::White, Piece::Rook)
            .moved_piece(Square(0, 0), Color::White, Piece::Rook)
            .piece(Square(7, 4), Color::Black, Piece::King)
            .build();
        assert_eq!(position.castling_field(), "K");
    }

    #[test]
    fn test_clear_square() {
        let position = PositionBuilder::starting_position()
            .clear(Square(0, 0))
            .build();

        assert!(position.piece_at(Square(0, 0)).is_none());
        assert!(position.piece_at(Square(0, 1)).is_some());
    }
}
