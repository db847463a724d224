use std::fmt;

use super::types::{Bitboard, BoardPiece, Color, Piece, Square};

/// What the piece table stores for an occupied square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Slot {
    pub(crate) color: Color,
    pub(crate) piece: Piece,
    pub(crate) moved: bool,
}

/// Placement of both sides at one point in the game.
///
/// Pieces live in a table keyed by square, so no two pieces can ever share a
/// square. Per-color occupancy bitboards are kept in sync with the table.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) squares: [Option<Slot>; 64],
    pub(crate) occupied: [Bitboard; 2],
}

impl Position {
    /// The standard 32-piece starting setup.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (i, piece) in back_rank.iter().enumerate() {
            position.set_piece(Square(0, i), Color::White, *piece, false);
            position.set_piece(Square(7, i), Color::Black, *piece, false);
            position.set_piece(Square(1, i), Color::White, Piece::Pawn, false);
            position.set_piece(Square(6, i), Color::Black, Piece::Pawn, false);
        }
        position
    }

    #[must_use]
    pub fn empty() -> Self {
        Position {
            squares: [None; 64],
            occupied: [Bitboard::EMPTY; 2],
        }
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece, moved: bool) {
        if let Some(old) = self.squares[sq.as_index()] {
            self.occupied[old.color.index()].remove(sq);
        }
        self.squares[sq.as_index()] = Some(Slot {
            color,
            piece,
            moved,
        });
        self.occupied[color.index()].insert(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Slot> {
        let slot = self.squares[sq.as_index()].take()?;
        self.occupied[slot.color.index()].remove(sq);
        Some(slot)
    }

    #[inline]
    pub(crate) fn slot(&self, sq: Square) -> Option<Slot> {
        self.squares[sq.as_index()]
    }

    /// The piece on `sq`, if any.
    #[must_use]
    pub fn occupant(&self, sq: Square) -> Option<BoardPiece> {
        self.slot(sq).map(|slot| BoardPiece {
            piece: slot.piece,
            color: slot.color,
            square: sq,
            moved: slot.moved,
        })
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.slot(sq).map(|slot| (slot.color, slot.piece))
    }

    #[inline]
    #[must_use]
    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        self.occupied[color.index()].contains(sq)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_none()
    }

    /// Squares holding a piece of `color`
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    /// Every piece of `color`, in square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = BoardPiece> + '_ {
        self.occupied_by(color)
            .iter()
            .filter_map(move |sq| self.occupant(sq))
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|p| p.piece == Piece::King)
            .map(|p| p.square)
    }

    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces(color).filter(|p| p.piece == piece).count()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

/// Text diagram, rank 8 at the top, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square(rank, file))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_setup() {
        let position = Position::new();
        assert_eq!(position.pieces(Color::White).count(), 16);
        assert_eq!(position.pieces(Color::Black).count(), 16);
        assert_eq!(position.king_square(Color::White), Some(Square(0, 4)));
        assert_eq!(position.king_square(Color::Black), Some(Square(7, 4)));
        assert_eq!(
            position.piece_at(Square(7, 3)),
            Some((Color::Black, Piece::Queen))
        );
        assert!(position.pieces(Color::White).all(|p| !p.moved));
    }

    #[test]
    fn test_occupancy_queries() {
        let position = Position::new();
        assert!(position.is_occupied_by(Square(1, 0), Color::White));
        assert!(!position.is_occupied_by(Square(1, 0), Color::Black));
        assert!(position.is_empty(Square(3, 3)));
        assert_eq!(position.occupant(Square(3, 3)), None);
        let knight = position.occupant(Square(0, 1)).unwrap();
        assert_eq!(knight.piece, Piece::Knight);
        assert_eq!(knight.square, Square(0, 1));
        assert_eq!(position.all_occupied().popcount(), 32);
    }

    #[test]
    fn test_set_piece_replaces_occupant() {
        let mut position = Position::empty();
        position.set_piece(Square(3, 3), Color::White, Piece::Rook, false);
        position.set_piece(Square(3, 3), Color::Black, Piece::Queen, true);
        assert!(!position.is_occupied_by(Square(3, 3), Color::White));
        assert!(position.is_occupied_by(Square(3, 3), Color::Black));
        assert_eq!(position.all_occupied().popcount(), 1);
        let removed = position.remove_piece(Square(3, 3)).unwrap();
        assert_eq!(removed.piece, Piece::Queen);
        assert!(removed.moved);
        assert!(position.all_occupied().is_empty());
    }

    #[test]
    fn test_display_diagram() {
        let text = Position::new().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
