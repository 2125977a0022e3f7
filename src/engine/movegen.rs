//! Move legality
//!
//! Legality is decided one move at a time by pure predicates:
//! - a universal self-capture check shared by every piece
//! - one movement rule per piece type, looked up in a table
//! - a path-clear check used by the sliding pieces
//!
//! There is no check detection. A king may walk into attack and may be
//! captured; that capture is what ends the game.

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, Color, Coord};
use crate::core::moves::{Destinations, Move};

/// Movement rule of one piece type: `(board, from, to, mover color)`
type Rule = fn(&Board, Coord, Coord, Color) -> bool;

/// Rules indexed by `PieceType::index()`
const RULES: [Rule; 6] = [
    pawn_rule,
    knight_rule,
    bishop_rule,
    rook_rule,
    queen_rule,
    king_rule,
];

/// Entry points of the legality engine
pub struct MoveGen;

impl MoveGen {
    /// Whether the piece on `from` may move to `to`.
    ///
    /// Total over all coordinate pairs: an empty `from`, a same-color
    /// destination and `from == to` are all simply illegal.
    pub fn is_legal(board: &Board, from: Coord, to: Coord) -> bool {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        if let Some(target) = board.piece_at(to) {
            if target.color == piece.color {
                return false;
            }
        }
        RULES[piece.piece_type.index()](board, from, to, piece.color)
    }

    /// `is_legal` over raw row/column values; anything off the board is illegal
    pub fn is_legal_raw(board: &Board, from: (i32, i32), to: (i32, i32)) -> bool {
        match (Coord::new(from.0, from.1), Coord::new(to.0, to.1)) {
            (Some(from), Some(to)) => Self::is_legal(board, from, to),
            _ => false,
        }
    }

    /// Every cell the piece on `from` may move to
    pub fn legal_destinations(board: &Board, from: Coord) -> Bitboard {
        if board.is_empty_at(from) {
            return Bitboard::EMPTY;
        }
        Coord::all()
            .filter(|&to| Self::is_legal(board, from, to))
            .collect()
    }

    /// Legal destinations split into quiet moves and captures
    pub fn destinations(board: &Board, from: Coord) -> Destinations {
        Destinations::partition(board, from, Self::legal_destinations(board, from))
    }

    /// Every legal move for the pieces of `color`
    pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
        board
            .pieces()
            .filter(|(_, piece)| piece.color == color)
            .flat_map(|(from, _)| {
                Self::legal_destinations(board, from)
                    .iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// No piece strictly between `from` and `to`.
    ///
    /// The endpoints are not inspected. Points that share neither a line nor
    /// a diagonal have no path and are reported as blocked.
    pub fn is_path_clear(board: &Board, from: Coord, to: Coord) -> bool {
        let (d_row, d_col) = deltas(from, to);
        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return false;
        }
        let (step_row, step_col) = (d_row.signum(), d_col.signum());
        let steps = d_row.abs().max(d_col.abs());
        (1..steps).all(|i| {
            from.offset(step_row * i, step_col * i)
                .is_some_and(|cell| board.is_empty_at(cell))
        })
    }
}

#[inline]
fn deltas(from: Coord, to: Coord) -> (i32, i32) {
    (
        i32::from(to.row()) - i32::from(from.row()),
        i32::from(to.col()) - i32::from(from.col()),
    )
}

fn pawn_rule(board: &Board, from: Coord, to: Coord, color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    let direction = color.pawn_direction();
    let target_empty = board.is_empty_at(to);

    if d_col == 0 {
        if d_row == direction && target_empty {
            return true;
        }
        // The cell jumped over is not inspected, only the destination.
        if from.row() == color.pawn_start_row() && d_row == 2 * direction && target_empty {
            return true;
        }
    }

    d_col.abs() == 1 && d_row == direction && !target_empty
}

fn rook_rule(board: &Board, from: Coord, to: Coord, _color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    if (d_row == 0) == (d_col == 0) {
        return false;
    }
    MoveGen::is_path_clear(board, from, to)
}

fn bishop_rule(board: &Board, from: Coord, to: Coord, _color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    if d_row.abs() != d_col.abs() {
        return false;
    }
    MoveGen::is_path_clear(board, from, to)
}

fn queen_rule(board: &Board, from: Coord, to: Coord, color: Color) -> bool {
    rook_rule(board, from, to, color) || bishop_rule(board, from, to, color)
}

fn king_rule(_board: &Board, from: Coord, to: Coord, _color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    d_row.abs() <= 1 && d_col.abs() <= 1
}

fn knight_rule(_board: &Board, from: Coord, to: Coord, _color: Color) -> bool {
    let (d_row, d_col) = deltas(from, to);
    matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
}
