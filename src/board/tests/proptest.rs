//! Property-based tests using proptest.

use crate::board::{parse_fen, Color, Move, Piece, Position, UnmakeInfo};
use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Pick a random legal move for `side`, choosing a queen for promotions.
fn random_legal_move(position: &Position, side: Color, rng: &mut StdRng) -> Option<Move> {
    let moves = position.legal_moves(side);
    if moves.is_empty() {
        return None;
    }
    let mv = moves[rng.gen_range(0..moves.len())];
    Some(if mv.reaches_promotion_rank() {
        mv.with_promotion(Piece::Queen)
    } else {
        mv
    })
}

proptest! {
    /// Property: make_move followed by unmake_move restores the position exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let initial = Position::new();
        let mut position = initial.clone();
        let mut side = Color::White;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();

        for _ in 0..num_moves {
            let Some(mv) = random_legal_move(&position, side, &mut rng) else {
                break;
            };
            let info = position.make_move(&mv).unwrap();
            history.push((mv, info));
            side = side.opponent();
        }

        while let Some((mv, info)) = history.pop() {
            position.unmake_move(&mv, info);
        }

        prop_assert_eq!(position, initial);
    }

    /// Property: legal moves never leave the mover's king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut position = Position::new();
        let mut side = Color::White;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            for mv in position.legal_moves(side).iter() {
                let after = position.apply(mv).unwrap();
                prop_assert!(!after.is_in_check(side), "Legal move left king in check: {:?}", mv);
            }
            let Some(mv) = random_legal_move(&position, side, &mut rng) else {
                break;
            };
            position.make_move(&mv).unwrap();
            side = side.opponent();
        }
    }

    /// Property: every reachable position keeps one king per color
    #[test]
    fn prop_one_king_per_color(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut position = Position::new();
        let mut side = Color::White;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let Some(mv) = random_legal_move(&position, side, &mut rng) else {
                break;
            };
            position.make_move(&mv).unwrap();
            side = side.opponent();

            for color in Color::BOTH {
                prop_assert_eq!(position.count(color, Piece::King), 1);
            }
            let occupied = position.all_occupied().popcount() as usize;
            let listed = position.pieces(Color::White).count() + position.pieces(Color::Black).count();
            prop_assert_eq!(occupied, listed);
        }
    }

    /// Property: legal moves are a subset of pseudo-legal moves
    #[test]
    fn prop_legal_subset_of_pseudo(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut position = Position::new();
        let mut side = Color::White;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let pseudo = position.pseudo_moves(side);
            for mv in position.legal_moves(side).iter() {
                prop_assert!(pseudo.iter().any(|p| p == mv));
            }
            let Some(mv) = random_legal_move(&position, side, &mut rng) else {
                break;
            };
            position.make_move(&mv).unwrap();
            side = side.opponent();
        }
    }

    /// Property: the encoding round-trip preserves placement and castling
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut position = Position::new();
        let mut side = Color::White;
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let Some(mv) = random_legal_move(&position, side, &mut rng) else {
                break;
            };
            position.make_move(&mv).unwrap();
            side = side.opponent();
        }

        let fen = position.to_fen(side);
        let (restored, restored_side) = parse_fen(&fen).unwrap();
        prop_assert_eq!(restored.placement(), position.placement());
        prop_assert_eq!(restored.castling_field(), position.castling_field());
        prop_assert_eq!(restored_side, side);
        prop_assert_eq!(restored.to_fen(side), fen);
    }
}
