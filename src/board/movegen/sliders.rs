use super::super::attack_tables::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use super::super::{Bitboard, Color, MoveList, Piece, Position, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    pub(crate) fn of(piece: Piece) -> Option<SliderType> {
        match piece {
            Piece::Bishop => Some(SliderType::Bishop),
            Piece::Rook => Some(SliderType::Rook),
            Piece::Queen => Some(SliderType::Queen),
            Piece::Pawn | Piece::Knight | Piece::King => None,
        }
    }

    fn directions(self) -> &'static [(isize, isize)] {
        match self {
            SliderType::Bishop => &BISHOP_DIRECTIONS,
            SliderType::Rook => &ROOK_DIRECTIONS,
            SliderType::Queen => &QUEEN_DIRECTIONS,
        }
    }
}

impl Position {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        color: Color,
        slider: SliderType,
    ) -> MoveList {
        let mut moves = MoveList::new();
        for to_sq in self.slider_targets(from, color, slider).iter() {
            self.push_move(&mut moves, from, to_sq);
        }
        moves
    }

    /// Squares reachable along each ray: a ray stops before an own piece and
    /// on an opposing piece (the capture), otherwise at the board edge.
    pub(crate) fn slider_targets(&self, from: Square, color: Color, slider: SliderType) -> Bitboard {
        let mut targets = Bitboard::EMPTY;
        for &(dr, df) in slider.directions() {
            let mut current = from;
            while let Some(next) = current.offset(dr, df) {
                if self.is_occupied_by(next, color) {
                    break;
                }
                targets.insert(next);
                if !self.is_empty(next) {
                    break;
                }
                current = next;
            }
        }
        targets
    }
}
