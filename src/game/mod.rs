//! Game flow on top of the board rules.
//!
//! [`GameState`] owns the position, the side to move, the recorded moves
//! with their cursor and the captured-piece ledger. It is driven by square
//! selection, promotion choices, history navigation and externally supplied
//! moves.
//!
//! # Example
//! ```
//! use chess_rules::board::Square;
//! use chess_rules::game::{GameState, SelectOutcome};
//!
//! let mut game = GameState::new();
//! game.select(Square(1, 4)).unwrap();
//! let outcome = game.select(Square(3, 4)).unwrap();
//! assert!(matches!(outcome, SelectOutcome::Moved(_)));
//! assert_eq!(game.cursor(), 1);
//! ```

mod history;
mod ledger;
pub mod record;
mod state;

pub use history::MoveHistory;
pub use ledger::{CapturedLedger, CapturedPiece};
pub use record::{import_uci_moves, parse_movetext, record_moves, ImportedMove};
pub use state::{GameState, Outcome, Phase, SelectOutcome};
