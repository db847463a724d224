use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Color, MoveList, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for to_sq in self.knight_targets(from, color).iter() {
            self.push_move(&mut moves, from, to_sq);
        }
        moves
    }

    #[inline]
    pub(crate) fn knight_targets(&self, from: Square, color: Color) -> Bitboard {
        KNIGHT_ATTACKS[from.as_index()] & !self.occupied_by(color)
    }
}
