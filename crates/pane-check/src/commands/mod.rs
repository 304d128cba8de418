//! Command implementations for pane-check
//!
//! Each command reads its input, runs the engine and prints the outcome;
//! the exit status is failure whenever an error was reported.

pub mod check;
pub mod eval;
pub mod explain;
