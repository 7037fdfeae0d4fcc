//! Bitboard chess positions: a position record codec, pseudo-legal pawn and
//! knight move generation, and a pure move applier.

pub mod board;
pub mod fen;
pub mod game_logic;
pub mod movegen;
pub mod moves;
pub mod play;
pub mod position;
pub mod render;

pub use board::{Bitboard, Color, Piece, Role, Square};
pub use moves::Move;
pub use position::{CastlingRights, Position};

/// Trait for choosing one move among the generated candidates.
///
/// Abstracts over random play and scripted or test inputs, providing a
/// uniform interface for `GameEngine`.
pub trait MoveSelector {
    /// Pick one of `moves`. Returns `None` only when `moves` is empty.
    fn select(&mut self, moves: &[Move]) -> Option<Move>;
}
