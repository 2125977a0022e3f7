//! Bitboard sets of board coordinates
//!
//! A bitboard is a 64-bit integer where each bit stands for one cell of the
//! board. Bit `row * 8 + col` is set when the cell at `(row, col)` is in the
//! set, so bit 0 is `a8` and bit 63 is `h1`.

use super::board::Coord;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// A set of board coordinates packed into 64 bits
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0u64);

    /// Row 0, the far rank
    pub const ROW_0: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    /// Column 0, the `a` file
    pub const COL_0: Bitboard = Bitboard(0x0101_0101_0101_0101);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Bitboard(value)
    }

    /// Create a set holding exactly one coordinate
    #[inline]
    pub const fn from_coord(coord: Coord) -> Self {
        Bitboard(1u64 << coord.index())
    }

    /// All cells of one row
    #[inline]
    pub const fn row_mask(row: u8) -> Self {
        Bitboard(Self::ROW_0.0 << (row * 8))
    }

    /// All cells of one column
    #[inline]
    pub const fn col_mask(col: u8) -> Self {
        Bitboard(Self::COL_0.0 << col)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Number of coordinates in the set
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, coord: Coord) -> bool {
        (self.0 & (1u64 << coord.index())) != 0
    }

    #[inline]
    pub fn insert(&mut self, coord: Coord) {
        self.0 |= 1u64 << coord.index();
    }

    #[inline]
    pub fn remove(&mut self, coord: Coord) {
        self.0 &= !(1u64 << coord.index());
    }

    /// Remove and return the lowest-indexed coordinate
    #[inline]
    pub fn pop_first(&mut self) -> Option<Coord> {
        if self.is_empty() {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Coord::from_index(index))
    }

    /// Iterate over the coordinates in row-major order
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }
}

/// Iterator over the coordinates in a bitboard
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_first()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Coord;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Coord> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for coord in iter {
            bb.insert(coord);
        }
        bb
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..8u8 {
            write!(f, "  {} ", 8 - row)?;
            for col in 0..8u8 {
                if (self.0 >> (row * 8 + col)) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        Ok(())
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
