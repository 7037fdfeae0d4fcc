use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use super::Square;

/// A 64-bit occupancy mask.
///
/// Each bit represents one square: bit 0 = a1, bit 63 = h8.
/// A set bit (1) indicates the square belongs to the set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_B: Bitboard = Bitboard(0x0202_0202_0202_0202);
    pub const FILE_G: Bitboard = Bitboard(0x4040_4040_4040_4040);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_FF00);
    pub const RANK_7: Bitboard = Bitboard(0x00FF_0000_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Creates a new bitboard with the given value.
    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.value()) != 0
    }

    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Sets the bit at the given square.
    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0 |= 1 << square.value();
    }

    /// Clears the bit at the given square.
    #[inline]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !(1 << square.value());
    }

    /// Toggles the bit at the given square.
    #[inline]
    pub fn toggle(&mut self, square: Square) {
        self.0 ^= 1 << square.value();
    }

    /// Lowest set square, if any.
    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::new(self.0.trailing_zeros() as u8)
        }
    }

    /// The square if exactly one bit is set.
    #[inline]
    pub fn single_square(self) -> Option<Square> {
        if self.0.is_power_of_two() {
            self.first()
        } else {
            None
        }
    }

    /// Removes and returns the lowest set square.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        let square = self.first()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// Shifts every bit by a signed square delta. Bits pushed past a1 or h8 are dropped;
    /// file wrap is the caller's concern.
    #[inline]
    pub const fn shift(self, delta: i8) -> Bitboard {
        if delta >= 0 {
            Bitboard(self.0 << delta)
        } else {
            Bitboard(self.0 >> -delta)
        }
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(square: Square) -> Self {
        square.bb()
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline]
    fn into_iter(self) -> Squares {
        Squares(self)
    }
}

/// Iterates squares in ascending index order, clearing the lowest bit each step.
#[derive(Debug, Clone)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for square in iter {
            bb.set(square);
        }
        bb
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018X})", self.0)
    }
}

/// Renders the mask as an 8x8 grid, rank 8 on top.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let bit = (self.0 >> (rank * 8 + file)) & 1;
                write!(f, "{} ", if bit == 1 { '1' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square is valid")
    }

    #[test]
    fn test_bitboard_toggle() {
        let mut bb = Bitboard::EMPTY;

        bb.toggle(Square::A1);
        assert_eq!(bb.value(), 1);

        bb.toggle(Square::A1);
        assert_eq!(bb.value(), 0);
    }

    #[test]
    fn test_bitboard_multiple_squares() {
        let mut bb = Bitboard::EMPTY;

        bb.set(Square::A1);
        bb.set(Square::H1);
        bb.set(Square::H8);

        assert_eq!(bb.value(), 0x8000000000000081);
        assert_eq!(bb.count(), 3);

        bb.clear(Square::H1);
        assert!(!bb.contains(Square::H1));
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let bb: Bitboard = [sq("h8"), sq("a1"), sq("e4"), sq("c2")].into_iter().collect();
        let squares: Vec<Square> = bb.into_iter().collect();
        assert_eq!(squares, vec![sq("a1"), sq("c2"), sq("e4"), sq("h8")]);
    }

    #[test]
    fn test_pop_first_clears_lowest_bit() {
        let mut bb = Bitboard::new(0b1010_0000);
        assert_eq!(bb.pop_first(), Square::new(5));
        assert_eq!(bb, Bitboard::new(0b1000_0000));
        assert_eq!(bb.pop_first(), Square::new(7));
        assert_eq!(bb.pop_first(), None);
    }

    #[test]
    fn test_single_square() {
        assert_eq!(sq("d5").bb().single_square(), Some(sq("d5")));
        assert_eq!(Bitboard::EMPTY.single_square(), None);
        assert_eq!(Bitboard::RANK_2.single_square(), None);
    }

    #[test]
    fn test_shift_drops_bits_off_the_board() {
        assert_eq!(Bitboard::RANK_8.shift(8), Bitboard::EMPTY);
        assert_eq!(Bitboard::RANK_1.shift(-8), Bitboard::EMPTY);
        assert_eq!(Bitboard::RANK_1.shift(8), Bitboard::RANK_2);
        assert_eq!(Bitboard::RANK_8.shift(-8), Bitboard::RANK_7);
    }

    #[test]
    fn test_display_draws_rank_eight_first() {
        let text = sq("a8").bb().to_string();
        assert!(text.starts_with("1 . . . . . . . "));
    }
}
