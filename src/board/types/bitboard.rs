//! Bitboard type and operations.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use super::square::Square;

/// A 64-bit set of squares, used for occupancy and attack sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);
}

impl Bitboard {
    /// Create a bitboard with a single square set
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1 << (sq.0 * 8 + sq.1))
    }

    /// Returns an iterator over the squares set in this bitboard
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// Returns true if the bitboard is empty
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count)
    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set
    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1 << (sq.0 * 8 + sq.1))) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= Bitboard::from_square(sq).0;
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !Bitboard::from_square(sq).0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.insert(sq);
        }
        bb
    }
}

/// Iterator over the squares of a bitboard, lowest index first
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 .0 == 0 {
            return None;
        }
        let idx = self.0 .0.trailing_zeros() as usize;
        self.0 .0 &= self.0 .0 - 1;
        Some(Square::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.popcount() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains_remove() {
        let mut bb = Bitboard::EMPTY;
        bb.insert(Square(3, 4));
        bb.insert(Square(0, 0));
        assert!(bb.contains(Square(3, 4)));
        assert!(!bb.contains(Square(4, 3)));
        assert_eq!(bb.popcount(), 2);
        bb.remove(Square(3, 4));
        assert_eq!(bb.iter().collect::<Vec<_>>(), vec![Square(0, 0)]);
    }

    #[test]
    fn test_collect_and_ops() {
        let a: Bitboard = [Square(0, 1), Square(0, 2)].into_iter().collect();
        let b = Bitboard::from_square(Square(0, 2));
        assert_eq!((a & b), b);
        assert_eq!((a | b), a);
        assert!((a & !b).contains(Square(0, 1)));
        assert!(!(a & !b).contains(Square(0, 2)));
    }
}
