pub mod core;
pub mod engine;
pub mod game;
pub mod ui;

pub use crate::core::{Board, Color, Coord, Move, Piece, PieceType};
pub use crate::engine::MoveGen;
pub use crate::game::{Event, GameState, Status};
pub use crate::ui::Console;
