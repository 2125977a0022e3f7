//! Text console
//!
//! This module stands in for a board view: it turns typed squares into
//! selection events and prints the state that results.

pub mod console;

pub use console::{Command, CommandError, Console, Options};
