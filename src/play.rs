//! Move application.
//!
//! [`Position::play`] is a pure transition: it returns a new position and
//! never logs. Callers that want to report what happened use
//! [`Position::inspect`] on the position before the move.

use thiserror::Error;

use crate::board::{Color, Piece, Role, Square};
use crate::moves::Move;
use crate::position::Position;

/// Error when a move does not fit the position it is played in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move {mv}: no {turn:?} piece on the source square")]
    EmptySource { mv: Move, turn: Color },
    #[error("invalid move {mv}: source and destination are the same square")]
    NullMove { mv: Move },
    #[error("invalid move {mv}: destination holds a piece of the side to move")]
    OwnPieceOnTarget { mv: Move },
}

/// What kind of transition a move is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    DoublePush,
    Capture,
    EnPassant,
}

/// A piece removed from the board by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    pub piece: Piece,
    pub square: Square,
}

/// Everything the applier derives about a move before executing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveInfo {
    pub mv: Move,
    pub piece: Piece,
    pub kind: MoveKind,
    pub captured: Option<Capture>,
}

impl MoveInfo {
    /// True when the move resets the halfmove clock.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.piece.role == Role::Pawn || self.captured.is_some()
    }
}

impl Position {
    /// Identifies the moving piece and any capture without changing the position.
    pub fn inspect(&self, mv: Move) -> Result<MoveInfo, MoveError> {
        if mv.from == mv.to {
            return Err(MoveError::NullMove { mv });
        }

        let piece = self
            .piece_at(mv.from)
            .filter(|piece| piece.color == self.turn)
            .ok_or(MoveError::EmptySource {
                mv,
                turn: self.turn,
            })?;

        let target = self.piece_at(mv.to);
        if target.is_some_and(|p| p.color == self.turn) {
            return Err(MoveError::OwnPieceOnTarget { mv });
        }

        if let Some(captured) = target {
            return Ok(MoveInfo {
                mv,
                piece,
                kind: MoveKind::Capture,
                captured: Some(Capture {
                    piece: captured,
                    square: mv.to,
                }),
            });
        }

        let kind = if piece.role != Role::Pawn {
            MoveKind::Quiet
        } else if mv.from.value().abs_diff(mv.to.value()) == 16 {
            MoveKind::DoublePush
        } else if Some(mv.to) == self.en_passant && mv.from.file() != mv.to.file() {
            MoveKind::EnPassant
        } else {
            MoveKind::Quiet
        };

        let captured = match kind {
            MoveKind::EnPassant => Square::from_coords(mv.to.file(), mv.from.rank())
                .and_then(|square| {
                    self.piece_at(square)
                        .filter(|p| *p == Piece::new(!self.turn, Role::Pawn))
                        .map(|piece| Capture { piece, square })
                }),
            _ => None,
        };

        Ok(MoveInfo {
            mv,
            piece,
            kind,
            captured,
        })
    }

    /// Plays `mv` and returns the resulting position.
    ///
    /// The move is not checked against piece movement rules, only against
    /// the structure of the position: the source must hold a piece of the
    /// side to move and the destination must not.
    pub fn play(&self, mv: Move) -> Result<Position, MoveError> {
        let info = self.inspect(mv)?;
        let mut next = self.clone();

        if let Some(capture) = info.captured {
            next.vacate(capture.square);
        }
        next.vacate(mv.from);
        next.pieces[info.piece.color.index()][info.piece.role.index()].set(mv.to);

        next.turn = !self.turn;

        next.halfmove_clock = if info.is_irreversible() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        if next.turn == Color::White {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        next.en_passant = match info.kind {
            MoveKind::DoublePush => mv.from.offset(self.turn.forward()),
            _ => None,
        };

        next.castling.discard_square(mv.from);
        next.castling.discard_square(mv.to);

        debug_assert!(next.is_consistent(), "masks overlap after {mv}");
        Ok(next)
    }
}
