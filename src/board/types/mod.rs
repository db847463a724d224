//! Core chess types.
//!
//! This module contains the fundamental types used throughout the rules engine:
//! - `Piece`, `Color` and `BoardPiece` - piece kinds, colors and placed pieces
//! - `Square` - (rank, file) board coordinate
//! - `Bitboard` - 64-bit square set for occupancy and attacks
//! - `Move` and `MoveList` - move representation
//! - `CastleSide` - castling wing

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastleSide;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{BoardPiece, Color, Piece, PROMOTION_PIECES};
pub use square::Square;
