use log::trace;

use super::error::{GameError, InvalidMoveReason};
use super::{BoardPiece, CastleSide, Move, Piece, Position, Square};

/// What `make_move` overwrote, so `unmake_move` can put it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<BoardPiece>,
    pub(crate) previous_moved: bool,
    pub(crate) previous_rook_moved: bool,
}

impl UnmakeInfo {
    /// The opposing piece removed from the destination, if any
    #[must_use]
    pub fn captured(&self) -> Option<BoardPiece> {
        self.captured
    }
}

fn invalid(square: Square, reason: InvalidMoveReason) -> GameError {
    GameError::InvalidMove { square, reason }
}

impl Position {
    /// Checks that `m` can be applied here without touching the position.
    fn validate(&self, m: &Move) -> Result<(), GameError> {
        let slot = self
            .slot(m.from)
            .ok_or_else(|| invalid(m.from, InvalidMoveReason::EmptySquare))?;
        if slot.piece != m.piece || slot.color != m.color {
            return Err(invalid(
                m.from,
                InvalidMoveReason::PieceMismatch {
                    found: slot.piece,
                    color: slot.color,
                },
            ));
        }
        if self.is_occupied_by(m.to, m.color) {
            return Err(invalid(m.from, InvalidMoveReason::OwnPieceOnTarget));
        }
        if self.slot(m.to).is_some_and(|target| target.piece == Piece::King) {
            return Err(invalid(m.from, InvalidMoveReason::KingOnTarget));
        }
        if let Some(side) = m.castle {
            let rook = self.slot(side.rook_home(m.color));
            let has_rook = rook.is_some_and(|r| r.piece == Piece::Rook && r.color == m.color);
            if !has_rook
                || m.piece != Piece::King
                || m.from != CastleSide::king_home(m.color)
                || m.to != side.king_target(m.color)
            {
                return Err(invalid(m.from, InvalidMoveReason::MissingCastlingRook));
            }
            // Both landing squares must be free; make_move would overwrite them.
            for square in [side.king_target(m.color), side.rook_target(m.color)] {
                if !self.is_empty(square) {
                    return Err(invalid(
                        m.from,
                        InvalidMoveReason::CastlingSquareOccupied { square },
                    ));
                }
            }
        }
        Ok(())
    }

    /// Applies `m` in place.
    ///
    /// The mover is relocated and marked as moved; an opposing piece on the
    /// destination is removed and returned through the [`UnmakeInfo`]; a
    /// castling move relocates its rook in the same call; a promotion
    /// changes the piece kind on arrival. Nothing is changed on error.
    pub fn make_move(&mut self, m: &Move) -> Result<UnmakeInfo, GameError> {
        self.validate(m)?;

        let captured = self.occupant(m.to);
        if captured.is_some() {
            self.remove_piece(m.to);
        }

        let previous_moved = self.remove_piece(m.from).is_some_and(|slot| slot.moved);
        let arriving = m.promotion.unwrap_or(m.piece);
        self.set_piece(m.to, m.color, arriving, true);

        let mut previous_rook_moved = false;
        if let Some(side) = m.castle {
            if let Some(rook) = self.remove_piece(side.rook_home(m.color)) {
                previous_rook_moved = rook.moved;
                self.set_piece(side.rook_target(m.color), m.color, Piece::Rook, true);
            }
        }

        trace!("made {m:?}, captured {captured:?}");
        Ok(UnmakeInfo {
            captured,
            previous_moved,
            previous_rook_moved,
        })
    }

    /// Reverses a move previously applied with [`Position::make_move`].
    ///
    /// Restores the original piece kind (so a promoted piece turns back into
    /// a pawn), the `moved` flags, the castling rook and any captured piece.
    pub fn unmake_move(&mut self, m: &Move, info: UnmakeInfo) {
        let arrived = self.remove_piece(m.to);
        debug_assert!(arrived.is_some(), "unmake_move: '{}' is empty", m.to);
        self.set_piece(m.from, m.color, m.piece, info.previous_moved);

        if let Some(side) = m.castle {
            let rook = self.remove_piece(side.rook_target(m.color));
            debug_assert!(rook.is_some(), "unmake_move: castling rook missing");
            self.set_piece(
                side.rook_home(m.color),
                m.color,
                Piece::Rook,
                info.previous_rook_moved,
            );
        }

        if let Some(captured) = info.captured {
            self.set_piece(
                captured.square,
                captured.color,
                captured.piece,
                captured.moved,
            );
        }
        trace!("unmade {m:?}");
    }

    /// Returns the position after `m`, leaving `self` untouched.
    pub fn apply(&self, m: &Move) -> Result<Position, GameError> {
        let mut next = self.clone();
        next.make_move(m)?;
        Ok(next)
    }

    /// Turns the pawn on `sq` into `piece`, keeping its color and square.
    pub fn promote(&mut self, sq: Square, piece: Piece) -> Result<(), GameError> {
        if !piece.is_promotion_choice() {
            return Err(GameError::InvalidPromotionPiece { piece });
        }
        match self.slot(sq) {
            Some(slot) if slot.piece == Piece::Pawn => {
                self.set_piece(sq, slot.color, piece, slot.moved);
                Ok(())
            }
            Some(_) => Err(invalid(sq, InvalidMoveReason::NotAPawn)),
            None => Err(invalid(sq, InvalidMoveReason::EmptySquare)),
        }
    }

    /// Builds a move from `from` to `to` for whatever stands on `from`,
    /// filling in the capture and inferring castling from a two-file king step.
    #[must_use]
    pub fn move_between(&self, from: Square, to: Square) -> Option<Move> {
        let (color, piece) = self.piece_at(from)?;
        let mut mv = Move::new(from, to, piece, color);
        if let Some((captured_color, captured)) = self.piece_at(to) {
            if captured_color != color {
                mv = mv.with_capture(captured);
            }
        }
        if piece == Piece::King && from == CastleSide::king_home(color) {
            mv.castle = CastleSide::from_king_move(from, to);
        }
        Some(mv)
    }
}
