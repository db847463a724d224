//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use chess_rules::board::prelude::*;
//! ```

pub use super::{
    parse_fen, Color, FenError, GameError, Move, MoveList, MoveParseError, Piece, Position,
    PositionBuilder, Square, SquareError,
};
