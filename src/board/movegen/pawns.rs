use super::super::attack_tables::PAWN_ATTACKS;
use super::super::{Bitboard, Color, MoveList, Position, Square};

impl Position {
    /// Pushes and diagonal captures for the pawn of `color` on `from`.
    ///
    /// A pawn reaching its last rank yields a single move without a
    /// promotion piece; the game layer asks for the piece afterwards.
    pub(crate) fn generate_pawn_moves(&self, from: Square, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        let dir = color.pawn_direction();

        if let Some(forward_sq) = from.offset(dir, 0) {
            if self.is_empty(forward_sq) {
                self.push_move(&mut moves, from, forward_sq);
                if from.0 == color.pawn_start_rank() {
                    if let Some(double_sq) = from.offset(2 * dir, 0) {
                        if self.is_empty(double_sq) {
                            self.push_move(&mut moves, from, double_sq);
                        }
                    }
                }
            }
        }

        let opponents = self.occupied_by(color.opponent());
        for target_sq in (self.pawn_attacks(from, color) & opponents).iter() {
            self.push_move(&mut moves, from, target_sq);
        }

        moves
    }

    /// The two diagonal squares a pawn of `color` on `from` strikes.
    #[inline]
    pub(crate) fn pawn_attacks(&self, from: Square, color: Color) -> Bitboard {
        PAWN_ATTACKS[color.index()][from.as_index()]
    }
}
