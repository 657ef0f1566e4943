//! Perfect-play tic-tac-toe.
//!
//! This library provides the rules of 3x3 tic-tac-toe and a minimax search with alpha-beta
//! pruning that picks the computer's move. Rendering, input handling and score display are
//! left to the caller, which owns the board, applies the human's moves and asks the search
//! for a reply.
//!
//! # Example
//!
//! ```rust
//! use ttt_minimax::board::{GameState, Marker};
//! use ttt_minimax::boards::tic_tac_toe::{Move, TicTacToeBoard};
//! use ttt_minimax::minimax::choose_ai_move;
//!
//! let mut board = TicTacToeBoard::new();
//!
//! // The human takes the centre
//! board.apply_move(Move::new(1, 1).unwrap(), Marker::Human);
//!
//! // Ask the search for the computer's reply and play it
//! if let Some(reply) = choose_ai_move(&board) {
//!     board.apply_move(reply, Marker::Ai);
//!     println!("The AI answers with {}", reply);
//! }
//!
//! assert_eq!(board.state(), GameState::Ongoing);
//! ```

/// Contains the `Board` trait and the markers, evaluations and game states it works with.
pub mod board;
/// Contains implementations of the `Board` trait.
pub mod boards;
/// Errors of the checked move API.
pub mod error;
/// The core module of the library, containing the `MinimaxSearch` implementation.
pub mod minimax;
/// Random number sources and the random opponent used for self-play.
pub mod random;
/// Contains the `SearchNode` struct, which represents a node in a recorded search tree.
pub mod search_node;
/// Win, loss and draw counters across games.
pub mod tally;

pub use board::{Board, Evaluation, GameState, Marker};
pub use boards::tic_tac_toe::{Move, TicTacToeBoard};
pub use error::MoveError;
pub use minimax::{MinimaxSearch, SearchResult, choose_ai_move};
pub use tally::ScoreTally;
