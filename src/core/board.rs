//! Board model
//!
//! An 8x8 grid of optional pieces addressed by `(row, col)`. Row 0 is the far
//! rank (black's home rank, rank 8) and row 7 the near rank (white's home
//! rank, rank 1). Column 0 is the `a` file.

use super::bitboard::Bitboard;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing squares or board placements
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("invalid move '{0}'")]
    InvalidMove(String),
    #[error("invalid board placement: {0}")]
    InvalidPlacement(#[from] shakmaty::fen::ParseFenError),
}

/// A cell on the board, always within `[0,7] x [0,7]`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Build a coordinate, rejecting anything off the board
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Coordinate for bit `index` of a bitboard (taken modulo 64)
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        let index = index & 63;
        Coord {
            row: index >> 3,
            col: index & 7,
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * 8 + self.col as usize
    }

    /// Step by a row/column delta, or `None` when that leaves the board
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Coord::new(i32::from(self.row) + d_row, i32::from(self.col) + d_col)
    }

    /// All 64 coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64u8).map(Coord::from_index)
    }

    /// Parse algebraic notation such as `e4`
    pub fn from_algebraic(s: &str) -> Result<Self, BoardError> {
        let sq: shakmaty::Square = s
            .trim()
            .parse()
            .map_err(|_| BoardError::InvalidSquare(s.to_string()))?;
        Ok(Coord::from_square(sq))
    }

    pub fn to_algebraic(self) -> String {
        self.to_square().to_string()
    }

    pub(crate) fn from_square(sq: shakmaty::Square) -> Self {
        let col = sq.file().char() as u8 - b'a';
        let row = b'8' - sq.rank().char() as u8;
        Coord { row, col }
    }

    pub(crate) fn to_square(self) -> shakmaty::Square {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(self.col)),
            shakmaty::Rank::new(u32::from(7 - self.row)),
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.to_algebraic(), self.row, self.col)
    }
}

impl FromStr for Coord {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::from_algebraic(s)
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_algebraic()
    }
}

impl TryFrom<String> for Coord {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Coord::from_algebraic(&s)
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row delta of a forward pawn step (white moves toward row 0)
    #[inline]
    pub const fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pawns of this color start on
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row holding this color's back rank in the initial layout
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Back rank order from column 0 to column 7
    pub const BACK_RANK: [PieceType; 8] = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }

    fn from_role(role: shakmaty::Role) -> Self {
        match role {
            shakmaty::Role::Pawn => PieceType::Pawn,
            shakmaty::Role::Knight => PieceType::Knight,
            shakmaty::Role::Bishop => PieceType::Bishop,
            shakmaty::Role::Rook => PieceType::Rook,
            shakmaty::Role::Queen => PieceType::Queen,
            shakmaty::Role::King => PieceType::King,
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(piece_type, color))
    }

    /// Unicode chess glyph
    pub const fn glyph(self) -> char {
        match (self.color, self.piece_type) {
            (Color::White, PieceType::King) => '♔',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Pawn) => '♟',
        }
    }

    fn from_shakmaty(piece: shakmaty::Piece) -> Self {
        let color = match piece.color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        };
        Piece::new(PieceType::from_role(piece.role), color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.name().to_lowercase(), self.piece_type.name())
    }
}

/// The 8x8 grid of cells
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard initial layout
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = usize::from(color.home_row());
            let pawns = usize::from(color.pawn_start_row());
            board.cells[home] =
                std::array::from_fn(|col| Some(Piece::new(PieceType::BACK_RANK[col], color)));
            board.cells[pawns] = std::array::from_fn(|_| Some(Piece::new(PieceType::Pawn, color)));
        }
        board
    }

    /// Parse the piece placement field of a FEN string, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`
    pub fn from_placement(placement: &str) -> Result<Self, BoardError> {
        let parsed: shakmaty::Board = placement.trim().parse()?;
        let mut board = Board::empty();
        for coord in Coord::all() {
            if let Some(piece) = parsed.piece_at(coord.to_square()) {
                board.put_piece(Piece::from_shakmaty(piece), coord);
            }
        }
        Ok(board)
    }

    /// Piece placement in FEN notation, row 0 first
    pub fn to_placement(&self) -> String {
        let mut fen = String::new();
        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.cells[usize::from(coord.row())][usize::from(coord.col())]
    }

    #[inline]
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.piece_at(coord).is_none()
    }

    /// Put a piece on a cell, returning whatever was there
    pub fn put_piece(&mut self, piece: Piece, coord: Coord) -> Option<Piece> {
        self.cells[usize::from(coord.row())][usize::from(coord.col())].replace(piece)
    }

    pub fn remove_piece(&mut self, coord: Coord) -> Option<Piece> {
        self.cells[usize::from(coord.row())][usize::from(coord.col())].take()
    }

    /// Move the piece on `from` to `to`, returning the captured piece.
    /// Does nothing when `from` is empty or equal to `to`.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        if from == to {
            return None;
        }
        let piece = self.remove_piece(from)?;
        self.put_piece(piece, to)
    }

    /// Every occupied cell with its piece, row-major
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|coord| self.piece_at(coord).map(|piece| (coord, piece)))
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces().map(|(coord, _)| coord).collect()
    }

    /// Cells holding pieces of one color
    pub fn color(&self, color: Color) -> Bitboard {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.pieces()
            .any(|(_, piece)| piece == Piece::new(PieceType::King, color))
    }

    /// Render as text, using Unicode glyphs or FEN letters
    pub fn render(&self, unicode: bool) -> String {
        let mut out = String::new();
        for (row, cells) in self.cells.iter().enumerate() {
            out.push_str(&format!("  {} ", 8 - row));
            for cell in cells {
                match cell {
                    Some(piece) if unicode => out.push(piece.glyph()),
                    Some(piece) => out.push(piece.to_char()),
                    None => out.push('.'),
                }
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("    a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{}", self.render(false))?;
        writeln!(f)?;
        writeln!(f, "  Placement: {}", self.to_placement())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_placement()
    }
}

impl TryFrom<String> for Board {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Board::from_placement(&s)
    }
}
