//! Chess rules and game-state engine.
//!
//! - [`board`]: positions, move generation and the legality filter
//! - [`game`]: the select / move / promote state machine with a navigable
//!   history
//! - [`uci`]: talking to an external UCI search process
//! - [`engine`]: a game session tied to that process

pub mod board;
pub mod engine;
pub mod game;
pub mod uci;

pub use board::{Color, GameError, Move, Piece, Position, Square};
pub use game::{GameState, Outcome};
