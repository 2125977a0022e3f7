//! Rules engine
//!
//! This module decides which moves are legal:
//! - Per-piece movement rules
//! - Path-clear check for sliding pieces
//! - Destination sets for highlighting

pub mod movegen;

pub use movegen::MoveGen;
