//! Errors raised by the checked move API.

use crate::boards::tic_tac_toe::Move;
use derive_more::{Display, Error};

/// Why a move was rejected by [`TicTacToeBoard::try_apply_move`] or [`Move::new`].
///
/// The search itself never produces these: it only ever plays moves it enumerated.
///
/// [`TicTacToeBoard::try_apply_move`]: crate::boards::tic_tac_toe::TicTacToeBoard::try_apply_move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The coordinate does not address a cell of the 3x3 grid.
    #[display("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    /// The addressed cell already holds a marker.
    #[display("cell {mv} is already taken")]
    Occupied { mv: Move },
    /// The board is already won or full.
    #[display("the game is already over")]
    GameOver,
}
