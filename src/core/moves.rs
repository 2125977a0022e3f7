//! Move representation
//!
//! A move is just a pair of cells; there are no promotions, castling or
//! en passant flags to carry.

use super::bitboard::Bitboard;
use super::board::{Board, BoardError, Coord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A piece moving from one cell to another
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }

    /// Coordinate notation, e.g. `e2e4`
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse coordinate notation (`e2e4`)
    pub fn from_uci(s: &str) -> Result<Self, BoardError> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(BoardError::InvalidMove(s.to_string()));
        }
        let from = Coord::from_algebraic(&s[0..2])?;
        let to = Coord::from_algebraic(&s[2..4])?;
        Ok(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl FromStr for Move {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

/// Legal destinations of one piece, split for highlighting.
///
/// The split only matters for display: a capture lands on a cell held by the
/// other color, a quiet move lands on an empty cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Destinations {
    pub quiet: Bitboard,
    pub captures: Bitboard,
}

impl Destinations {
    /// Split `targets` of the piece on `from` into quiet moves and captures
    pub fn partition(board: &Board, from: Coord, targets: Bitboard) -> Self {
        let Some(mover) = board.piece_at(from) else {
            return Destinations::default();
        };
        let captures = targets & board.color(mover.color.opposite());
        Destinations {
            quiet: targets & !captures,
            captures,
        }
    }

    pub fn all(self) -> Bitboard {
        self.quiet | self.captures
    }

    pub fn is_empty(self) -> bool {
        self.all().is_empty()
    }
}
