//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `movegen.rs` - Per-piece generation and perft node counts
//! - `legality.rs` - Self-check filtering, check and castling rules
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `proptest.rs` - Property-based tests

mod movegen;
mod proptest;

use crate::board::{Color, Move, Position, Square};

/// Parse a square in algebraic notation; test helper only.
pub(super) fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

/// Legal move from `from` to `to`, panicking if there is none.
pub(super) fn find_move(position: &Position, from: &str, to: &str) -> Move {
    position
        .legal_moves_from(sq(from))
        .find_to(sq(to))
        .unwrap_or_else(|| panic!("expected legal move {from}{to}"))
}

/// Counts leaf nodes of the legal move tree. Pawns reaching the last rank
/// are expanded into a single move, so positions with promotions do not
/// match published perft tables.
pub(super) fn perft(position: &mut Position, side: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.legal_moves(side);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves.iter() {
        let info = position.make_move(mv).unwrap();
        nodes += perft(position, side.opponent(), depth - 1);
        position.unmake_move(mv, info);
    }
    nodes
}
