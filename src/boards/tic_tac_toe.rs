use crate::board::{Board, Evaluation, GameState, Marker};
use crate::error::MoveError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// A cell coordinate on the 3x3 grid. Both components are in `0..=2`.
#[derive(Debug, Display, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[display("({row}, {col})")]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// All nine cells in row-major scan order.
    pub const ALL: [Move; 9] = [
        Move::at(0, 0),
        Move::at(0, 1),
        Move::at(0, 2),
        Move::at(1, 0),
        Move::at(1, 1),
        Move::at(1, 2),
        Move::at(2, 0),
        Move::at(2, 1),
        Move::at(2, 2),
    ];

    /// Creates a move, rejecting coordinates outside the grid.
    pub fn new(row: u8, col: u8) -> Result<Self, MoveError> {
        if row > 2 || col > 2 {
            return Err(MoveError::OutOfBounds { row, col });
        }
        Ok(Move::at(row, col))
    }

    const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }
}

impl TryFrom<(u8, u8)> for Move {
    type Error = MoveError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Move::new(row, col)
    }
}

impl From<Move> for (u8, u8) {
    fn from(mv: Move) -> Self {
        (mv.row, mv.col)
    }
}

/// The eight lines that win the game: three rows, three columns and both diagonals.
pub const WINNING_LINES: [[Move; 3]; 8] = [
    [Move::at(0, 0), Move::at(0, 1), Move::at(0, 2)],
    [Move::at(1, 0), Move::at(1, 1), Move::at(1, 2)],
    [Move::at(2, 0), Move::at(2, 1), Move::at(2, 2)],
    [Move::at(0, 0), Move::at(1, 0), Move::at(2, 0)],
    [Move::at(0, 1), Move::at(1, 1), Move::at(2, 1)],
    [Move::at(0, 2), Move::at(1, 2), Move::at(2, 2)],
    [Move::at(0, 0), Move::at(1, 1), Move::at(2, 2)],
    [Move::at(0, 2), Move::at(1, 1), Move::at(2, 0)],
];

/// The rules engine: a 3x3 grid where every cell is empty or holds one marker.
///
/// Whose turn it is is not stored; the caller knows it from the order of play.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct TicTacToeBoard {
    cells: [[Option<Marker>; 3]; 3],
}

impl TicTacToeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the marker on the given cell, if any.
    pub fn get(&self, mv: Move) -> Option<Marker> {
        self.cells[mv.row as usize][mv.col as usize]
    }

    /// Places `marker` on the cell without checking that it is empty.
    ///
    /// The caller is responsible for only offering empty cells; use
    /// [`try_apply_move`](Self::try_apply_move) to have the board check instead.
    #[instrument(level = "trace", skip(self))]
    pub fn apply_move(&mut self, mv: Move, marker: Marker) {
        self.cells[mv.row as usize][mv.col as usize] = Some(marker);
    }

    /// Places `marker` on the cell if the game is still running and the cell is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn try_apply_move(&mut self, mv: Move, marker: Marker) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.get(mv).is_some() {
            return Err(MoveError::Occupied { mv });
        }
        self.apply_move(mv, marker);
        Ok(())
    }

    /// Resets every cell to empty.
    pub fn clear_all(&mut self) {
        self.cells = Default::default();
    }

    /// Returns true if `marker` occupies all three cells of any winning line.
    pub fn has_won(&self, marker: Marker) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&mv| self.get(mv) == Some(marker)))
    }

    /// Returns the marker holding a winning line, if any.
    pub fn winner(&self) -> Option<Marker> {
        [Marker::Human, Marker::Ai]
            .into_iter()
            .find(|&marker| self.has_won(marker))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Number of cells holding a marker.
    pub fn marked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// True once either marker has won or no empty cell remains.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// The absolute game state, as a shell would report it.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn state(&self) -> GameState {
        self.evaluate(Marker::Human).into()
    }

    /// Builds a board from three row strings using `X` for the human, `O` for the AI and
    /// any other character for an empty cell.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; 3]) -> Self {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().take(3).enumerate() {
                let marker = match symbol {
                    'X' => Some(Marker::Human),
                    'O' => Some(Marker::Ai),
                    _ => None,
                };
                board.cells[row][col] = marker;
            }
        }
        board
    }
}

impl Board for TicTacToeBoard {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Self::Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.get(mv).is_none())
            .collect()
    }

    fn evaluate(&self, marker: Marker) -> Evaluation {
        if self.has_won(marker) {
            Evaluation::Win
        } else if self.has_won(marker.opponent()) {
            Evaluation::Loss
        } else if self.is_full() {
            Evaluation::Draw
        } else {
            Evaluation::Ongoing
        }
    }

    fn place(&mut self, mv: Self::Move, marker: Marker) {
        self.apply_move(mv, marker);
    }

    fn clear(&mut self, mv: Self::Move) {
        self.cells[mv.row as usize][mv.col as usize] = None;
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.map_or('.', Marker::symbol))?;
            }
        }
        Ok(())
    }
}
