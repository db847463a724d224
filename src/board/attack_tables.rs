//! Precomputed attack tables for leaper pieces (knights, kings, pawns) and
//! the direction sets used for ray casting.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates

use once_cell::sync::Lazy;

use super::types::Bitboard;

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        attacks[sq] = Bitboard(mask);
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&QUEEN_DIRECTIONS));

/// Diagonal capture squares per color: `[white, black][square]`
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Square;

    #[test]
    fn test_knight_corner_and_center() {
        assert_eq!(KNIGHT_ATTACKS[Square(0, 0).as_index()].popcount(), 2);
        assert_eq!(KNIGHT_ATTACKS[Square(3, 3).as_index()].popcount(), 8);
        assert!(KNIGHT_ATTACKS[Square(0, 6).as_index()].contains(Square(2, 5)));
    }

    #[test]
    fn test_king_edges() {
        assert_eq!(KING_ATTACKS[Square(0, 0).as_index()].popcount(), 3);
        assert_eq!(KING_ATTACKS[Square(0, 4).as_index()].popcount(), 5);
        assert_eq!(KING_ATTACKS[Square(4, 4).as_index()].popcount(), 8);
    }

    #[test]
    fn test_pawn_attacks_by_color() {
        let white = PAWN_ATTACKS[0][Square(1, 4).as_index()];
        assert!(white.contains(Square(2, 3)));
        assert!(white.contains(Square(2, 5)));
        let black = PAWN_ATTACKS[1][Square(6, 0).as_index()];
        assert_eq!(black.iter().collect::<Vec<_>>(), vec![Square(5, 1)]);
    }
}
