mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::{Bitboard, Color, Move, MoveList, Piece, Position, Square};

impl Position {
    /// Pseudo-legal moves for the piece standing on `from`.
    ///
    /// Moves are generated for the piece's own color regardless of whose turn
    /// it is. An empty square yields an empty list.
    #[must_use]
    pub fn pseudo_moves_from(&self, from: Square) -> MoveList {
        match self.piece_at(from) {
            Some((color, piece)) => self.generate_piece_moves(from, color, piece),
            None => MoveList::new(),
        }
    }

    pub(crate) fn generate_piece_moves(&self, from: Square, color: Color, piece: Piece) -> MoveList {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from, color),
            Piece::Knight => self.generate_knight_moves(from, color),
            Piece::Bishop | Piece::Rook | Piece::Queen => match SliderType::of(piece) {
                Some(slider) => self.generate_slider_moves(from, color, slider),
                None => MoveList::new(),
            },
            Piece::King => self.generate_king_moves(from, color),
        }
    }

    /// Every pseudo-legal move available to `color`.
    #[must_use]
    pub fn pseudo_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for piece in self.pieces(color) {
            moves.extend_from(&self.generate_piece_moves(piece.square, color, piece.piece));
        }
        moves
    }

    /// Squares `color` attacks, used for check and castling tests.
    ///
    /// Kings contribute nothing: their own move generation consults this set,
    /// so counting them would recurse. Pawns contribute the two diagonals they
    /// strike rather than their pushes; other pieces contribute their
    /// pseudo-legal destinations.
    #[must_use]
    pub fn attacked_squares(&self, color: Color) -> Bitboard {
        let mut attacked = Bitboard::EMPTY;
        for piece in self.pieces(color) {
            let from = piece.square;
            attacked |= match piece.piece {
                Piece::Pawn => self.pawn_attacks(from, color),
                Piece::Knight => self.knight_targets(from, color),
                Piece::Bishop | Piece::Rook | Piece::Queen => match SliderType::of(piece.piece) {
                    Some(slider) => self.slider_targets(from, color, slider),
                    None => Bitboard::EMPTY,
                },
                Piece::King => Bitboard::EMPTY,
            };
        }
        attacked
    }

    /// Appends the move `from`→`to` for the piece on `from`, tagging a capture.
    ///
    /// Kings are never captured: a target holding one is still attacked, but
    /// no move onto it is produced.
    fn push_move(&self, moves: &mut MoveList, from: Square, to: Square) {
        let Some((color, piece)) = self.piece_at(from) else {
            return;
        };
        let mut mv = Move::new(from, to, piece, color);
        match self.piece_at(to) {
            Some((_, Piece::King)) => return,
            Some((victim_color, victim)) if victim_color != color => {
                mv = mv.with_capture(victim);
            }
            _ => {}
        }
        moves.push(mv);
    }
}
