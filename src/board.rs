use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Score reported when the evaluated marker has three in a row.
pub const WIN_SCORE: i32 = 1000;
/// Score reported when the opponent of the evaluated marker has three in a row.
pub const LOSS_SCORE: i32 = -1000;
/// Score reported for a full board with no winner.
pub const DRAW_SCORE: i32 = 1;
/// Score reported while the game is still undecided.
pub const ONGOING_SCORE: i32 = 0;

/// The interface the minimax search needs from a game position.
///
/// Implementors are mutated in place by the search: a marker is placed, the subtree is
/// explored, and the same cell is cleared again before the next sibling is tried.
pub trait Board {
    /// The type representing a move, e.g. a `(row, col)` coordinate.
    type Move: Copy + Debug + PartialEq;

    /// Returns every legal move in a fixed scan order.
    ///
    /// The order only matters for tie-breaking: the search keeps the first of several
    /// equally scored moves.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Evaluates the position from the point of view of `marker`.
    fn evaluate(&self, marker: Marker) -> Evaluation;

    /// Places `marker` on the cell addressed by `mv`.
    fn place(&mut self, mv: Self::Move, marker: Marker);

    /// Empties the cell addressed by `mv`.
    fn clear(&mut self, mv: Self::Move);
}

/// One of the two symbols that can occupy a cell.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Marker {
    /// The human player, drawn as `X`.
    Human,
    /// The computer player, drawn as `O`.
    Ai,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::Human => Marker::Ai,
            Marker::Ai => Marker::Human,
        }
    }

    /// The character used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            Marker::Human => 'X',
            Marker::Ai => 'O',
        }
    }
}

/// The state of a position relative to one marker.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Evaluation {
    /// The game is still ongoing.
    Ongoing,
    /// The evaluated marker has three in a row.
    Win,
    /// The opponent has three in a row.
    Loss,
    /// The board is full and nobody has won.
    Draw,
}

impl Evaluation {
    /// The signed sentinel score used by the search.
    pub fn score(self) -> i32 {
        match self {
            Evaluation::Ongoing => ONGOING_SCORE,
            Evaluation::Win => WIN_SCORE,
            Evaluation::Loss => LOSS_SCORE,
            Evaluation::Draw => DRAW_SCORE,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Evaluation::Ongoing
    }
}

/// The absolute state of a game, independent of any point of view.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum GameState {
    Ongoing,
    PlayerWin,
    AiWin,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        self != GameState::Ongoing
    }
}

impl From<Evaluation> for GameState {
    /// Interprets an evaluation made from the human's point of view.
    fn from(evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::Ongoing => GameState::Ongoing,
            Evaluation::Win => GameState::PlayerWin,
            Evaluation::Loss => GameState::AiWin,
            Evaluation::Draw => GameState::Draw,
        }
    }
}
