//! Concrete implementations of the `Board` trait.

/// The 3x3 tic-tac-toe board and its rules.
pub mod tic_tac_toe;
