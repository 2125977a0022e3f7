//! Turn and selection state machine
//!
//! A game is driven entirely by selection events, one cell at a time. The
//! first selection picks up a piece of the side to move, the second either
//! drops it (same cell), moves it (legal destination), swaps to another own
//! piece, or cancels. Every completed move flips the turn and re-checks
//! whether both kings are still on the board.

use crate::core::bitboard::Bitboard;
use crate::core::board::{Board, Color, Coord, Piece};
use crate::core::moves::{Destinations, Move};
use crate::engine::movegen::MoveGen;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the game is still being played
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Status {
    InProgress,
    /// At most one color still has a king. `winner` is `None` when no king
    /// is left at all.
    Ended { winner: Option<Color> },
}

impl Status {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, Status::Ended { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "Game in progress"),
            Status::Ended { winner: Some(color) } => write!(f, "Game Over! {} wins!", color),
            Status::Ended { winner: None } => write!(f, "Game Over! Draw!"),
        }
    }
}

/// Which half of a move the next selection completes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    SelectingSource,
    SelectingDestination(Coord),
}

/// What a single selection did to the game
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// Nothing changed: the game is over, the cell was off the board, or no
    /// own piece was picked while nothing was selected.
    Ignored,
    Selected(Coord),
    Deselected(Coord),
    /// Another own piece replaced the previous selection.
    Reselected { from: Coord, to: Coord },
    /// The destination was illegal and not an own piece; selection cleared.
    Cancelled(Move),
    Moved {
        mv: Move,
        piece: Piece,
        captured: Option<Piece>,
        status: Status,
    },
}

/// Complete state of one game: board, side to move, selection and status
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Color,
    selection: Option<Coord>,
    status: Status,
}

impl GameState {
    /// A fresh game: initial layout, white to move, nothing selected
    pub fn new() -> Self {
        GameState {
            board: Board::startpos(),
            turn: Color::White,
            selection: None,
            status: Status::InProgress,
        }
    }

    /// Start from an arbitrary layout. The king check runs after the first
    /// completed move, as it does for every other move.
    pub fn with_board(board: Board, turn: Color) -> Self {
        GameState {
            board,
            turn,
            selection: None,
            status: Status::InProgress,
        }
    }

    /// Throw away everything and start over
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn phase(&self) -> Phase {
        match self.selection {
            Some(coord) => Phase::SelectingDestination(coord),
            None => Phase::SelectingSource,
        }
    }

    /// Selection event on raw row/column values; off-board input is ignored
    pub fn handle_click(&mut self, row: i32, col: i32) -> Event {
        match Coord::new(row, col) {
            Some(coord) => self.handle_selection(coord),
            None => Event::Ignored,
        }
    }

    /// Apply one selection event
    pub fn handle_selection(&mut self, coord: Coord) -> Event {
        if self.status.is_over() {
            return Event::Ignored;
        }

        let Some(selected) = self.selection else {
            if self.owns(coord) {
                self.selection = Some(coord);
                return Event::Selected(coord);
            }
            return Event::Ignored;
        };

        if coord == selected {
            self.selection = None;
            return Event::Deselected(coord);
        }

        let mv = Move::new(selected, coord);
        if MoveGen::is_legal(&self.board, selected, coord) {
            return self.apply(mv);
        }

        if self.owns(coord) {
            self.selection = Some(coord);
            Event::Reselected {
                from: selected,
                to: coord,
            }
        } else {
            self.selection = None;
            Event::Cancelled(mv)
        }
    }

    /// Every cell the piece on `coord` may move to
    pub fn legal_destinations(&self, coord: Coord) -> Bitboard {
        MoveGen::legal_destinations(&self.board, coord)
    }

    /// Destinations of the selected piece split into quiet moves and
    /// captures; empty when nothing is selected
    pub fn highlights(&self) -> Destinations {
        match self.selection {
            Some(coord) => MoveGen::destinations(&self.board, coord),
            None => Destinations::default(),
        }
    }

    /// Every legal move of the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGen::legal_moves(&self.board, self.turn)
    }

    fn owns(&self, coord: Coord) -> bool {
        self.board
            .piece_at(coord)
            .is_some_and(|piece| piece.color == self.turn)
    }

    fn apply(&mut self, mv: Move) -> Event {
        let Some(piece) = self.board.remove_piece(mv.from) else {
            self.selection = None;
            return Event::Cancelled(mv);
        };
        let captured = self.board.put_piece(piece, mv.to);
        self.selection = None;
        self.turn = self.turn.opposite();
        self.evaluate_status();
        Event::Moved {
            mv,
            piece,
            captured,
            status: self.status,
        }
    }

    /// End the game once fewer than two colors have a king
    fn evaluate_status(&mut self) {
        let kings: Vec<Color> = Color::ALL
            .into_iter()
            .filter(|&color| self.board.has_king(color))
            .collect();
        if kings.len() < 2 {
            self.status = Status::Ended {
                winner: kings.first().copied(),
            };
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
