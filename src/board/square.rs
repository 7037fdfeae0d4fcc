use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Bitboard;

/// A single square on the chess board (0-63).
///
/// Internally stores index `rank * 8 + file` where:
/// - 0 = a1, 7 = h1
/// - 56 = a8, 63 = h8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const E1: Square = Square(4);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const E8: Square = Square(60);
    pub const H8: Square = Square(63);

    /// Creates a new Square if the index is valid (0-63).
    #[inline]
    pub const fn new(idx: u8) -> Option<Self> {
        if idx < 64 { Some(Square(idx)) } else { None }
    }

    /// Builds a square from zero-based file and rank indices (both 0-7).
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Returns the internal index value (0-63).
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based file index (0 = a, 7 = h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// Zero-based rank index (0 = rank 1, 7 = rank 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// Returns the file letter ('a'-'h') of this square.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    /// Returns the rank digit ('1'-'8') of this square.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    /// Moves the square by a signed index delta, if the result stays on the board.
    ///
    /// No file wrap check: callers guard edges themselves.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Square> {
        let idx = self.0 as i16 + delta as i16;
        if idx >= 0 && idx < 64 {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// The single-bit mask for this square.
    #[inline]
    pub const fn bb(self) -> Bitboard {
        Bitboard::new(1 << self.0)
    }
}

/// Parse algebraic notation like "e4" into a Square.
///
/// # Examples
/// ```
/// # use bitboard_chess::board::Square;
/// let square: Square = "e4".parse().unwrap();
/// assert_eq!(square.value(), 28);
/// ```
impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::WrongLength(s.to_string()));
        };

        if !('a'..='h').contains(&file) {
            return Err(SquareError::BadFile(s.to_string()));
        }
        if !('1'..='8').contains(&rank) {
            return Err(SquareError::BadRank(s.to_string()));
        }

        Ok(Square((rank as u8 - b'1') * 8 + (file as u8 - b'a')))
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Only a mask with exactly one bit set names a square.
impl TryFrom<Bitboard> for Square {
    type Error = SquareError;

    fn try_from(bb: Bitboard) -> Result<Self, Self::Error> {
        bb.single_square()
            .ok_or(SquareError::NotSingleSquare(bb.value()))
    }
}

/// Error type for square notation and square masks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("square must be 2 characters (e.g., 'e4'), got '{0}'")]
    WrongLength(String),
    #[error("file must be a-h, got '{0}'")]
    BadFile(String),
    #[error("rank must be 1-8, got '{0}'")]
    BadRank(String),
    #[error("mask {0:#018X} does not hold exactly one square")]
    NotSingleSquare(u64),
}

/// Renders a single-square mask as its two-character notation.
pub fn square_to_notation(mask: Bitboard) -> Result<String, SquareError> {
    Square::try_from(mask).map(|sq| sq.to_string())
}

/// Parses two-character notation into a single-square mask.
pub fn notation_to_square(text: &str) -> Result<Bitboard, SquareError> {
    text.parse::<Square>().map(Square::bb)
}
