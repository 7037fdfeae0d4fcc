//! Position record codec.
//!
//! A record has four to six space-separated fields:
//! `<placement> <active colour> <castling> <en passant> [<halfmove clock> [<fullmove number>]]`.
//! Placement lists ranks 8 down to 1 separated by `/`, digits count empty
//! squares, and letters name pieces (uppercase White, lowercase Black).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Color, Piece, Square, SquareError};
use crate::position::{CastlingRights, Position};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Error when parsing a position record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, got {0}")]
    TooFewFields(usize),
    #[error("expected at most 6 fields, got {0}")]
    TooManyFields(usize),
    #[error("expected 8 ranks in placement, got {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {files} files instead of 8")]
    RankWidth { rank: u8, files: u32 },
    #[error("invalid character '{0}' in piece placement")]
    UnknownPiece(char),
    #[error("invalid active colour: '{0}'")]
    ActiveColor(String),
    #[error("invalid {field}: '{value}'")]
    Counter { field: &'static str, value: String },
    #[error("invalid en passant square: {0}")]
    EnPassant(#[from] SquareError),
}

/// Parses a position record.
pub fn parse(text: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.len() {
        n if n < 4 => return Err(FenError::TooFewFields(n)),
        n if n > 6 => return Err(FenError::TooManyFields(n)),
        _ => {}
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, fields[0])?;

    pos.turn = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::ActiveColor(other.to_string())),
    };

    pos.castling = parse_castling(fields[2]);

    pos.en_passant = match fields[3] {
        "-" => None,
        square => Some(square.parse::<Square>()?),
    };

    if let Some(value) = fields.get(4) {
        pos.halfmove_clock = parse_counter("halfmove clock", value)?;
    }
    if let Some(value) = fields.get(5) {
        pos.fullmove_number = parse_counter("fullmove number", value)?;
        if pos.fullmove_number == 0 {
            return Err(FenError::Counter {
                field: "fullmove number",
                value: value.to_string(),
            });
        }
    }

    Ok(pos)
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - idx as u8;
        let mut file: u32 = 0;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip;
                continue;
            }

            let piece = Piece::from_char(ch).ok_or(FenError::UnknownPiece(ch))?;
            let square = u8::try_from(file)
                .ok()
                .and_then(|file| Square::from_coords(file, rank))
                .ok_or(FenError::RankWidth {
                    rank: rank + 1,
                    files: file + 1,
                })?;
            let placed = pos.put(square, piece);
            debug_assert!(placed, "{square} placed twice");
            file += 1;
        }
        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(())
}

/// `-` means no rights; characters other than `KQkq` are ignored.
fn parse_castling(field: &str) -> CastlingRights {
    let mut rights = CastlingRights::NONE;
    for ch in field.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => {}
        }
    }
    rights
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, FenError> {
    value.parse().map_err(|_| FenError::Counter {
        field,
        value: value.to_string(),
    })
}

/// Serializes a position into its six-field record.
pub fn serialize(pos: &Position) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8).rev() {
        let mut empty = 0u8;
        for file in 0..8 {
            let piece = Square::from_coords(file, rank).and_then(|sq| pos.piece_at(sq));
            match piece {
                Some(piece) => {
                    if empty > 0 {
                        fen.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    fen.push(piece.char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push((b'0' + empty) as char);
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(pos.turn.char());

    fen.push(' ');
    fen.push_str(&castling_field(pos.castling));

    fen.push(' ');
    match pos.en_passant {
        Some(sq) => fen.push_str(&sq.to_string()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(" {} {}", pos.halfmove_clock, pos.fullmove_number));
    fen
}

fn castling_field(rights: CastlingRights) -> String {
    if rights.is_empty() {
        return "-".to_string();
    }
    [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ]
    .into_iter()
    .filter_map(|(set, ch)| set.then_some(ch))
    .collect()
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Formats the position as its record.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
