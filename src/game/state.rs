//! The turn-by-turn game state machine.

use log::debug;

use crate::board::{
    fullmove_number, parse_fen, Color, FenError, GameError, InvalidMoveReason, Move, MoveList,
    Piece, Position, Square, UnmakeInfo,
};
use crate::uci::UciMove;

use super::history::MoveHistory;
use super::ledger::CapturedLedger;

/// Where the game is in the select / move / promote cycle.
///
/// Selection and a pending promotion are mutually exclusive by
/// construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the side to move to pick a piece
    #[default]
    Idle,
    /// A piece of the side to move is picked; these are its legal moves
    PieceSelected { square: Square, moves: MoveList },
    /// A pawn stands on its last rank waiting for the promotion piece
    AwaitingPromotion { square: Square },
}

/// Result of [`GameState::select`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Empty square or opposing piece with nothing selected
    Ignored,
    /// A piece was picked up
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
    /// The click was not a legal destination; selection dropped
    Deselected,
    /// A move was played and the turn passed
    Moved(Move),
    /// A pawn reached its last rank; the turn waits for the promotion piece
    PromotionRequired { square: Square },
}

/// How the game stands for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

/// A game in progress: position, turn, recorded moves and captures.
///
/// The position always equals the start position with the first
/// `cursor()` recorded moves applied. Every operation either succeeds or
/// returns an error with the state untouched.
#[derive(Clone, Debug)]
pub struct GameState {
    start: Position,
    start_side: Color,
    /// Move number of the start position
    start_fullmove: u32,
    position: Position,
    side_to_move: Color,
    history: MoveHistory,
    ledger: CapturedLedger,
    phase: Phase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A new game from the standard setup, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Position::new(), Color::White)
    }

    /// A new game from an arbitrary position.
    #[must_use]
    pub fn from_position(position: Position, side_to_move: Color) -> Self {
        debug_assert!(
            Color::BOTH
                .iter()
                .all(|&c| position.count(c, Piece::King) == 1),
            "game started without one king per side"
        );
        GameState {
            start: position.clone(),
            start_side: side_to_move,
            start_fullmove: 1,
            position,
            side_to_move,
            history: MoveHistory::new(),
            ledger: CapturedLedger::new(),
            phase: Phase::Idle,
        }
    }

    /// A new game from a board encoding.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (position, side) = parse_fen(fen)?;
        let mut game = Self::from_position(position, side);
        game.start_fullmove = fullmove_number(fen);
        Ok(game)
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[must_use]
    pub fn ledger(&self) -> &CapturedLedger {
        &self.ledger
    }

    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    /// The square of the pawn waiting for its promotion piece.
    #[must_use]
    pub fn pending_promotion(&self) -> Option<Square> {
        match self.phase {
            Phase::AwaitingPromotion { square } => Some(square),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<Square> {
        match self.phase {
            Phase::PieceSelected { square, .. } => Some(square),
            _ => None,
        }
    }

    /// Legal destinations of the selected piece, empty without a selection.
    #[must_use]
    pub fn highlighted(&self) -> Vec<Square> {
        match &self.phase {
            Phase::PieceSelected { moves, .. } => moves.destinations(),
            _ => Vec::new(),
        }
    }

    /// Encoding of the current position; the move number counts on from
    /// the start position's and advances after each Black move.
    #[must_use]
    pub fn fen(&self) -> String {
        let black_started = usize::from(self.start_side == Color::Black);
        let completed = (self.cursor() + black_started) / 2;
        let fullmove = u32::try_from(completed)
            .map_or(u32::MAX, |n| self.start_fullmove.saturating_add(n));
        self.position.encode(self.side_to_move, fullmove)
    }

    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.position.is_in_check(self.side_to_move)
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.pending_promotion().is_some() || self.position.has_legal_moves(self.side_to_move) {
            return Outcome::Ongoing;
        }
        if self.is_in_check() {
            Outcome::Checkmate {
                winner: self.side_to_move.opponent(),
            }
        } else {
            Outcome::Stalemate
        }
    }

    /// Handle a click on `square`.
    ///
    /// With nothing selected, a piece of the side to move is picked up and
    /// its legal destinations computed; anything else is ignored. With a
    /// piece selected, a legal destination plays the move and any other
    /// square drops the selection.
    pub fn select(&mut self, square: Square) -> Result<SelectOutcome, GameError> {
        match &self.phase {
            Phase::AwaitingPromotion { square: pending } => {
                Err(GameError::PromotionPending { square: *pending })
            }
            Phase::Idle => {
                if !self.position.is_occupied_by(square, self.side_to_move) {
                    return Ok(SelectOutcome::Ignored);
                }
                let moves = self.position.legal_moves_from(square);
                let destinations = moves.destinations();
                debug!(
                    "selected {square}: {} legal destinations",
                    destinations.len()
                );
                self.phase = Phase::PieceSelected { square, moves };
                Ok(SelectOutcome::Selected {
                    square,
                    destinations,
                })
            }
            Phase::PieceSelected { square: from, moves } => match moves.find_to(square) {
                Some(mv) => self.play(mv),
                None => {
                    debug!("{square} is not a destination of {from}; selection dropped");
                    self.phase = Phase::Idle;
                    Ok(SelectOutcome::Deselected)
                }
            },
        }
    }

    /// Play the legal move from `from` to `to` for the side to move.
    ///
    /// Same transition as selecting both squares, but a bad origin or
    /// destination is reported instead of ignored.
    pub fn play_move(&mut self, from: Square, to: Square) -> Result<SelectOutcome, GameError> {
        if let Some(square) = self.pending_promotion() {
            return Err(GameError::PromotionPending { square });
        }
        match self.position.piece_at(from) {
            None => {
                return Err(GameError::InvalidMove {
                    square: from,
                    reason: InvalidMoveReason::EmptySquare,
                })
            }
            Some((color, found)) if color != self.side_to_move => {
                return Err(GameError::InvalidMove {
                    square: from,
                    reason: InvalidMoveReason::PieceMismatch { found, color },
                })
            }
            Some(_) => {}
        }
        let mv = self
            .position
            .legal_moves_from(from)
            .find_to(to)
            .ok_or(GameError::IllegalDestination { from, to })?;
        self.play(mv)
    }

    /// Applies a legal move and records it at the cursor.
    fn play(&mut self, mv: Move) -> Result<SelectOutcome, GameError> {
        let ply = self.cursor();
        let info = self.position.make_move(&mv)?;
        self.history.push(mv, info);
        self.record_capture(info, ply);

        if mv.reaches_promotion_rank() && mv.promotion.is_none() {
            debug!("{mv:?} reached the last rank; awaiting promotion");
            self.phase = Phase::AwaitingPromotion { square: mv.to };
            return Ok(SelectOutcome::PromotionRequired { square: mv.to });
        }

        self.side_to_move = self.side_to_move.opponent();
        self.phase = Phase::Idle;
        debug!("played {mv:?} at ply {ply}");
        Ok(SelectOutcome::Moved(mv))
    }

    /// Resolve a pending promotion with `piece`, passing the turn.
    pub fn choose_promotion(&mut self, piece: Piece) -> Result<Move, GameError> {
        let square = self
            .pending_promotion()
            .ok_or(GameError::NoPromotionPending)?;
        if !piece.is_promotion_choice() {
            return Err(GameError::InvalidPromotionPiece { piece });
        }
        self.position.promote(square, piece)?;
        self.history.set_last_promotion(piece);
        self.side_to_move = self.side_to_move.opponent();
        self.phase = Phase::Idle;
        debug!("pawn on {square} promoted to {piece}");
        self.history
            .last_applied()
            .ok_or(GameError::NoPromotionPending)
    }

    /// Take back the pawn move that is waiting for its promotion piece.
    pub fn cancel_promotion(&mut self) -> Result<Move, GameError> {
        let square = self
            .pending_promotion()
            .ok_or(GameError::NoPromotionPending)?;
        let (mv, info) = self
            .history
            .discard_last()
            .ok_or(GameError::NoPromotionPending)?;
        self.position.unmake_move(&mv, info);
        self.ledger.forget_from(self.cursor());
        self.phase = Phase::Idle;
        debug!("promotion on {square} cancelled; {mv:?} taken back");
        Ok(mv)
    }

    /// Apply the next recorded move.
    pub fn step_forward(&mut self) -> Result<Move, GameError> {
        if let Some(square) = self.pending_promotion() {
            return Err(GameError::PromotionPending { square });
        }
        let ply = self.cursor();
        let mv = self.history.next_move().ok_or(GameError::OutOfRange {
            cursor: ply,
            len: self.history.len(),
        })?;
        let info = self.position.make_move(&mv)?;
        self.history.advance(info);
        self.record_capture(info, ply);
        self.side_to_move = self.side_to_move.opponent();
        self.phase = Phase::Idle;
        debug!("stepped forward to ply {}: {mv:?}", ply + 1);
        Ok(mv)
    }

    /// Take back the last applied move, keeping it available for
    /// [`GameState::step_forward`].
    pub fn step_backward(&mut self) -> Result<Move, GameError> {
        if let Some(square) = self.pending_promotion() {
            return Err(GameError::PromotionPending { square });
        }
        let (mv, info) = self.history.retreat().ok_or(GameError::OutOfRange {
            cursor: 0,
            len: self.history.len(),
        })?;
        self.position.unmake_move(&mv, info);
        self.ledger.forget_from(self.cursor());
        self.side_to_move = self.side_to_move.opponent();
        self.phase = Phase::Idle;
        debug!("stepped back to ply {}: {mv:?}", self.cursor());
        Ok(mv)
    }

    /// Move the cursor to `target` by stepping, stopping at the first error.
    pub fn seek(&mut self, target: usize) -> Result<(), GameError> {
        if target > self.history.len() {
            return Err(GameError::OutOfRange {
                cursor: target,
                len: self.history.len(),
            });
        }
        while self.cursor() < target {
            self.step_forward()?;
        }
        while self.cursor() > target {
            self.step_backward()?;
        }
        Ok(())
    }

    /// Back to the standard 32-piece setup with an empty history.
    pub fn reset_to_initial(&mut self) {
        *self = Self::new();
        debug!("game reset to the initial setup");
    }

    /// Replace the history with `moves`, none of them applied.
    ///
    /// The position returns to the game's start position; the moves are
    /// replayed one at a time with [`GameState::step_forward`].
    pub fn load_external_move_list(&mut self, moves: Vec<Move>) {
        debug!("loaded {} external moves", moves.len());
        self.position = self.start.clone();
        self.side_to_move = self.start_side;
        self.history = MoveHistory::from_moves(moves);
        self.ledger.clear();
        self.phase = Phase::Idle;
    }

    /// Apply a move given in UCI text (`e2e4`, `e7e8q`) for the side to move,
    /// resolving any promotion in the same call.
    pub fn apply_external_move(&mut self, text: &str) -> Result<Move, GameError> {
        let uci: UciMove = text
            .trim()
            .parse()
            .map_err(|error| GameError::MalformedExternalMove {
                notation: text.trim().to_string(),
                error,
            })?;
        if let Some(promotion) = uci.promotion {
            if !promotion.is_promotion_choice() {
                return Err(GameError::InvalidPromotionPiece { piece: promotion });
            }
        }

        let before = self.clone();
        let result = match self.play_move(uci.from, uci.to)? {
            SelectOutcome::PromotionRequired { .. } => {
                self.choose_promotion(uci.promotion.unwrap_or(Piece::Queen))
            }
            SelectOutcome::Moved(mv) => Ok(mv),
            _ => Err(GameError::IllegalDestination {
                from: uci.from,
                to: uci.to,
            }),
        };
        if result.is_err() {
            *self = before;
        }
        result
    }

    fn record_capture(&mut self, info: UnmakeInfo, ply: usize) {
        if let Some(captured) = info.captured() {
            debug!("ply {ply} captured {captured}");
            self.ledger.record(captured, ply);
        }
    }
}
