use log::trace;

use super::super::attack_tables::KING_ATTACKS;
use super::super::{CastleSide, Color, Move, MoveList, Piece, Position, Square};

impl Position {
    /// King steps that do not walk into an attacked square, plus castling.
    ///
    /// Each step is checked by placing the king on the target (removing any
    /// captured piece) and recomputing the opponent's attacked squares, so a
    /// square only shielded by the king itself is not mistaken for safe.
    pub(crate) fn generate_king_moves(&self, from: Square, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        let targets = KING_ATTACKS[from.as_index()] & !self.occupied_by(color);

        for to_sq in targets.iter() {
            let mut scratch = self.clone();
            scratch.remove_piece(from);
            scratch.set_piece(to_sq, color, Piece::King, true);
            if scratch.attacked_squares(color.opponent()).contains(to_sq) {
                trace!("king step {from}{to_sq} lands on an attacked square");
                continue;
            }
            self.push_move(&mut moves, from, to_sq);
        }

        for side in CastleSide::BOTH {
            if self.can_castle(color, side) {
                moves.push(Move::castling(color, side));
            }
        }

        moves
    }

    /// Castling eligibility for `color` on `side`.
    ///
    /// The king must stand unmoved on its home square with an unmoved own rook
    /// in the corner; every square between them must be empty; and neither
    /// the king's square nor any between square may be attacked.
    #[must_use]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        let king_sq = CastleSide::king_home(color);
        let king_ready = self
            .slot(king_sq)
            .is_some_and(|s| s.color == color && s.piece == Piece::King && !s.moved);
        let rook_ready = self
            .slot(side.rook_home(color))
            .is_some_and(|s| s.color == color && s.piece == Piece::Rook && !s.moved);
        if !king_ready || !rook_ready {
            return false;
        }

        let rank = color.back_rank();
        let path_clear = side
            .between_files()
            .iter()
            .all(|&file| self.is_empty(Square(rank, file)));
        if !path_clear {
            return false;
        }

        let attacked = self.attacked_squares(color.opponent());
        !attacked.contains(king_sq)
            && side
                .between_files()
                .iter()
                .all(|&file| !attacked.contains(Square(rank, file)))
    }
}
