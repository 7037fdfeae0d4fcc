use crate::board::{Bitboard, Color, Piece, Role, Square};

/// Castling availability, one flag per side and wing.
///
/// Rights are tracked and kept up to date when kings and rooks move or are
/// captured, but castling moves themselves are never generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside
            || self.white_queenside
            || self.black_kingside
            || self.black_queenside)
    }

    /// Drops every right that depends on a piece standing on `square`.
    pub fn discard_square(&mut self, square: Square) {
        match square {
            Square::E1 => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Square::H1 => self.white_kingside = false,
            Square::A1 => self.white_queenside = false,
            Square::E8 => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
            Square::H8 => self.black_kingside = false,
            Square::A8 => self.black_queenside = false,
            _ => {}
        }
    }
}

/// A complete chess position.
///
/// Piece placement is stored as twelve occupancy masks, one per colour and
/// role. No two masks share a set bit. A `Position` is a value: the move
/// applier returns a new one instead of mutating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) turn: Color,
    pub(crate) en_passant: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The standard initial layout, White to move.
    pub const fn new() -> Self {
        const BACK_RANK: [u64; 6] = [0, 0x42, 0x24, 0x81, 0x08, 0x10];
        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        pieces[0][0] = Bitboard::RANK_2;
        pieces[1][0] = Bitboard::RANK_7;
        let mut role = 1;
        while role < 6 {
            pieces[0][role] = Bitboard::new(BACK_RANK[role]);
            pieces[1][role] = Bitboard::new(BACK_RANK[role] << 56);
            role += 1;
        }
        Position {
            pieces,
            turn: Color::White,
            en_passant: None,
            castling: CastlingRights::ALL,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// A board with no pieces, White to move, no rights.
    pub const fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            turn: Color::White,
            en_passant: None,
            castling: CastlingRights::NONE,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Occupancy mask of a single coloured piece type.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.color.index()][piece.role.index()]
    }

    /// All squares occupied by `color`.
    pub fn by_color(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// Pieces of the side to move.
    #[inline]
    pub fn us(&self) -> Bitboard {
        self.by_color(self.turn)
    }

    /// Pieces of the side not to move.
    #[inline]
    pub fn them(&self) -> Bitboard {
        self.by_color(!self.turn)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color(Color::White) | self.by_color(Color::Black)
    }

    /// The piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Color::ALL.into_iter().find_map(|color| {
            Role::ALL
                .into_iter()
                .find(|role| self.pieces[color.index()][role.index()].contains(square))
                .map(|role| Piece::new(color, role))
        })
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Square skipped by the last double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The en passant target as a mask with at most one bit set.
    #[inline]
    pub fn en_passant_mask(&self) -> Bitboard {
        self.en_passant.map_or(Bitboard::EMPTY, Square::bb)
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// True when the twelve occupancy masks are pairwise disjoint.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for bb in self.pieces.iter().flatten() {
            if seen.intersects(*bb) {
                return false;
            }
            seen |= *bb;
        }
        true
    }

    /// Places `piece` on an empty `square`. Returns false if the square was taken.
    pub(crate) fn put(&mut self, square: Square, piece: Piece) -> bool {
        if self.occupied().contains(square) {
            return false;
        }
        self.pieces[piece.color.index()][piece.role.index()].set(square);
        true
    }

    /// Removes whatever stands on `square` from every mask.
    pub(crate) fn vacate(&mut self, square: Square) {
        for bb in self.pieces.iter_mut().flatten() {
            bb.clear(square);
        }
    }
}
