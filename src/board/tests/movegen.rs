//! Move generation tests: per-piece patterns and perft node counts.

use super::{perft, sq};
use crate::board::{parse_fen, Color, Piece, Position, PositionBuilder, Square};

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(usize, u64)],
}

// Only positions whose counts do not depend on en passant, promotion
// expansion or castling through an attacked b-file square.
const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depths: &[(1, 20), (2, 400), (3, 8902)],
    },
    TestPosition {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depths: &[(1, 14), (2, 191)],
    },
    TestPosition {
        name: "Castling",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        depths: &[(1, 26)],
    },
];

#[test]
fn test_perft_positions() {
    for test in TEST_POSITIONS {
        let (mut position, side) = parse_fen(test.fen).unwrap();
        for &(depth, expected) in test.depths {
            let nodes = perft(&mut position, side, depth);
            assert_eq!(
                nodes, expected,
                "Perft failed for position '{}' at depth {}",
                test.name, depth
            );
        }
    }
}

#[test]
#[ignore = "slow; run with --ignored"]
fn test_perft_initial_depth_4() {
    let mut position = Position::new();
    assert_eq!(perft(&mut position, Color::White, 4), 197_281);
}

#[test]
fn test_empty_square_has_no_moves() {
    assert!(Position::new().pseudo_moves_from(sq("e4")).is_empty());
}

#[test]
fn test_generation_ignores_turn() {
    let position = Position::new();
    let black_knight = position.pseudo_moves_from(sq("b8"));
    let mut targets = black_knight.destinations();
    targets.sort();
    assert_eq!(targets, vec![sq("a6"), sq("c6")]);
    assert!(black_knight.iter().all(|m| m.color == Color::Black));
}

#[test]
fn test_pawn_double_push_needs_both_squares_empty() {
    let blocked_near = PositionBuilder::starting_position()
        .piece(sq("e3"), Color::Black, Piece::Knight)
        .build();
    let moves = blocked_near.pseudo_moves_from(sq("e2"));
    assert!(moves.is_empty(), "pawn jumped over e3: {moves:?}");

    let blocked_far = PositionBuilder::starting_position()
        .piece(sq("e4"), Color::Black, Piece::Knight)
        .build();
    assert_eq!(
        blocked_far.pseudo_moves_from(sq("e2")).destinations(),
        vec![sq("e3")]
    );
}

#[test]
fn test_pawn_double_push_only_from_start_rank() {
    let position = PositionBuilder::new()
        .moved_piece(sq("d3"), Color::White, Piece::Pawn)
        .piece(sq("h6"), Color::Black, Piece::Pawn)
        .build();
    assert_eq!(position.pseudo_moves_from(sq("d3")).destinations(), vec![sq("d4")]);
    assert_eq!(position.pseudo_moves_from(sq("h6")).destinations(), vec![sq("h5")]);
}

#[test]
fn test_pawn_captures_only_opponents() {
    let position = PositionBuilder::new()
        .piece(sq("d4"), Color::White, Piece::Pawn)
        .piece(sq("c5"), Color::Black, Piece::Rook)
        .piece(sq("e5"), Color::White, Piece::Knight)
        .piece(sq("d5"), Color::Black, Piece::Pawn)
        .build();
    let moves = position.pseudo_moves_from(sq("d4"));
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, sq("c5"));
    assert_eq!(moves[0].captured, Some(Piece::Rook));
}

#[test]
fn test_promotion_push_is_a_single_move() {
    let position = PositionBuilder::new()
        .piece(sq("a7"), Color::White, Piece::Pawn)
        .build();
    let moves = position.pseudo_moves_from(sq("a7"));
    assert_eq!(moves.len(), 1);
    assert!(moves[0].reaches_promotion_rank());
    assert_eq!(moves[0].promotion, None);
}

#[test]
fn test_knight_in_corner() {
    let position = PositionBuilder::new()
        .piece(Square(0, 0), Color::White, Piece::Knight)
        .piece(sq("c2"), Color::White, Piece::Pawn)
        .build();
    assert_eq!(position.pseudo_moves_from(sq("a1")).destinations(), vec![sq("b3")]);
}

#[test]
fn test_slider_rays_stop_at_pieces() {
    let position = PositionBuilder::new()
        .piece(sq("d4"), Color::White, Piece::Rook)
        .piece(sq("d6"), Color::Black, Piece::Pawn)
        .piece(sq("f4"), Color::White, Piece::Pawn)
        .build();
    let mut targets = position.pseudo_moves_from(sq("d4")).destinations();
    targets.sort();
    let mut expected = vec![
        sq("d5"),
        sq("d6"),
        sq("d3"),
        sq("d2"),
        sq("d1"),
        sq("e4"),
        sq("c4"),
        sq("b4"),
        sq("a4"),
    ];
    expected.sort();
    assert_eq!(targets, expected);
}

#[test]
fn test_queen_combines_rook_and_bishop() {
    let position = PositionBuilder::new()
        .piece(sq("d4"), Color::White, Piece::Queen)
        .build();
    assert_eq!(position.pseudo_moves_from(sq("d4")).len(), 27);
}

#[test]
fn test_attacked_squares_exclude_kings() {
    let position = PositionBuilder::new()
        .piece(sq("e1"), Color::White, Piece::King)
        .piece(sq("e8"), Color::Black, Piece::King)
        .build();
    assert!(position.attacked_squares(Color::White).is_empty());
    assert!(position.attacked_squares(Color::Black).is_empty());
}

#[test]
fn test_pawns_attack_diagonals_not_pushes() {
    let position = PositionBuilder::new()
        .piece(sq("e2"), Color::White, Piece::Pawn)
        .build();
    let attacked = position.attacked_squares(Color::White);
    assert!(attacked.contains(sq("d3")));
    assert!(attacked.contains(sq("f3")));
    assert!(!attacked.contains(sq("e3")));
    assert!(!attacked.contains(sq("e4")));
}

#[test]
fn test_no_move_captures_a_king() {
    let position = PositionBuilder::new()
        .piece(sq("e1"), Color::White, Piece::King)
        .piece(sq("e4"), Color::White, Piece::Rook)
        .piece(sq("e8"), Color::Black, Piece::King)
        .build();
    let rook = position.pseudo_moves_from(sq("e4"));
    assert!(rook.find_to(sq("e8")).is_none());
    assert!(rook.find_to(sq("e7")).is_some());
    assert!(position.attacked_squares(Color::White).contains(sq("e8")));
}
