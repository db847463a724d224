//! Board representation and move rules.
//!
//! A [`Position`] is a square-indexed piece table with per-color occupancy
//! bitboards. Moves are generated per piece, filtered for self-check, and
//! applied with reversible make/unmake.
//!
//! # Example
//! ```
//! use chess_rules::board::{Position, Square};
//!
//! let position = Position::new();
//! let knight = position.legal_moves_from(Square(0, 6));
//! assert_eq!(knight.len(), 2);
//! ```

mod attack_tables;
mod builder;
mod error;
mod fen;
mod legality;
mod make_unmake;
mod movegen;
mod position;
pub mod prelude;
mod san;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{
    FenError, GameError, InvalidMoveReason, MoveParseError, RecordError, SanError, SquareError,
};
pub use fen::{fullmove_number, parse_fen, START_FEN};
pub use make_unmake::UnmakeInfo;
pub use position::Position;
pub use types::{
    Bitboard, BitboardIter, BoardPiece, CastleSide, Color, Move, MoveList, MoveListIntoIter, Piece,
    Square, PROMOTION_PIECES,
};
