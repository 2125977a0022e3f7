//! Game flow
//!
//! Owns the board and sequences moves through selection events.

pub mod state;

pub use state::{Event, GameState, Phase, Status};
