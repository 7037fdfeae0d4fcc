//! Pseudo-legal move generation.
//!
//! Moves obey piece movement and occupancy rules but are not checked for
//! leaving the mover's king attacked. Only pawns and knights move; bishops,
//! rooks, queens and kings generate nothing, and castling and promotion are
//! not produced.
//!
//! Output order is deterministic: the pawn block comes before the knight
//! block, and within each block sources are visited in ascending square order.

use crate::board::{Bitboard, Color, Piece, Role, Square};
use crate::moves::Move;
use crate::position::Position;

pub type MoveList = Vec<Move>;

/// All pseudo-legal moves for the side to move.
pub fn generate(pos: &Position) -> MoveList {
    let mut moves = MoveList::with_capacity(48);
    pawn_moves(pos, &mut moves);
    knight_moves(pos, &mut moves);
    moves
}

/// Pushes, double pushes, diagonal captures and en passant captures, per pawn.
pub fn pawn_moves(pos: &Position, moves: &mut MoveList) {
    let turn = pos.turn();
    let empty = !pos.occupied();
    let them = pos.them();
    let home_rank = match turn {
        Color::White => Bitboard::RANK_2,
        Color::Black => Bitboard::RANK_7,
    };
    let forward = turn.forward();

    for from in pos.pieces(Piece::new(turn, Role::Pawn)) {
        let bb = from.bb();

        let single = bb.shift(forward) & empty;
        if let Some(to) = single.single_square() {
            moves.push(Move::new(from, to));

            let double = single.shift(forward) & empty;
            if home_rank.contains(from)
                && let Some(to) = double.single_square()
            {
                moves.push(Move::new(from, to));
            }
        }

        for to in pawn_attacks(turn, from) & them {
            moves.push(Move::new(from, to));
        }

        if let Some(target) = en_passant_target(pos)
            && pawn_attacks(turn, from).contains(target)
        {
            moves.push(Move::new(from, target));
        }
    }
}

/// Knight jumps onto empty or opponent-held squares.
pub fn knight_moves(pos: &Position, moves: &mut MoveList) {
    let not_ours = !pos.us();
    for from in pos.pieces(Piece::new(pos.turn(), Role::Knight)) {
        for to in knight_attacks(from) & not_ours {
            moves.push(Move::new(from, to));
        }
    }
}

/// Squares a pawn of `color` on `square` attacks, with file wrap masked out.
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    let bb = square.bb();
    let (west, east) = match color {
        Color::White => (7, 9),
        Color::Black => (-9, -7),
    };
    (bb & !Bitboard::FILE_A).shift(west) | (bb & !Bitboard::FILE_H).shift(east)
}

/// Squares a knight on `square` attacks.
///
/// Each jump is suppressed when the source file would wrap around the board
/// edge; jumps past rank 1 or rank 8 fall off the mask.
pub fn knight_attacks(square: Square) -> Bitboard {
    let bb = square.bb();
    let not_a = bb & !Bitboard::FILE_A;
    let not_h = bb & !Bitboard::FILE_H;
    let not_ab = bb & !(Bitboard::FILE_A | Bitboard::FILE_B);
    let not_gh = bb & !(Bitboard::FILE_G | Bitboard::FILE_H);

    not_a.shift(15)
        | not_h.shift(17)
        | not_ab.shift(6)
        | not_gh.shift(10)
        | not_h.shift(-15)
        | not_a.shift(-17)
        | not_gh.shift(-6)
        | not_ab.shift(-10)
}

/// The en passant target, if an opposing pawn really stands behind it and the square is free.
fn en_passant_target(pos: &Position) -> Option<Square> {
    let target = pos.en_passant()?;
    let passed = target.offset(-pos.turn().forward())?;
    let their_pawns = pos.pieces(Piece::new(!pos.turn(), Role::Pawn));
    (their_pawns.contains(passed) && !pos.occupied().contains(target)).then_some(target)
}
