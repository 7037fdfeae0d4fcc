//! Board primitives: squares, occupancy masks and pieces.

mod bitboard;
mod piece;
mod square;

pub use bitboard::{Bitboard, Squares};
pub use piece::{Color, Piece, Role};
pub use square::{Square, SquareError, notation_to_square, square_to_notation};
