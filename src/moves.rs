use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Bitboard, Square, SquareError};

/// A from/to square pair.
///
/// Carries no piece, capture or special-move tag; the applier derives those
/// from the position it is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Builds a move from two single-square masks.
    pub fn from_masks(from: Bitboard, to: Bitboard) -> Result<Self, SquareError> {
        Ok(Move {
            from: Square::try_from(from)?,
            to: Square::try_from(to)?,
        })
    }

    #[inline]
    pub fn from_mask(self) -> Bitboard {
        self.from.bb()
    }

    #[inline]
    pub fn to_mask(self) -> Bitboard {
        self.to.bb()
    }
}

/// Error when parsing four-character move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be 4 characters (e.g., 'e2e4'), got '{0}'")]
    WrongLength(String),
    #[error(transparent)]
    Square(#[from] SquareError),
}

/// Parses source and destination notation, e.g. "e2e4". Promotion suffixes are not accepted.
impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveParseError::WrongLength(s.to_string()));
        }
        let (from, to) = s.split_at(2);
        Ok(Move {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
