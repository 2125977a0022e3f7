//! Core board types
//!
//! This module contains the data model the rules operate on:
//! - Bitboard sets of coordinates
//! - Coordinates, pieces and the board grid
//! - Moves and highlighted destinations

pub mod bitboard;
pub mod board;
pub mod moves;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, BoardError, Color, Coord, Piece, PieceType};
pub use moves::{Destinations, Move};
