use crate::board::{Board, Marker};
use crate::search_node::SearchNode;
use ego_tree::{NodeId, Tree};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument, trace};

/// Points subtracted (for the AI) or added (for the human) per ply of depth.
///
/// Prefers faster wins and slower losses among otherwise equal outcomes.
pub const DEFAULT_DEPTH_BIAS: i32 = 10;

/// The marker whose score the search maximises. Every position is evaluated from its side.
pub const MAXIMIZING_MARKER: Marker = Marker::Ai;

/// The best move found by a search and the score it was given.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SearchResult<M> {
    /// `None` when the searched position was already terminal.
    pub best_move: Option<M>,
    pub score: i32,
}

/// Minimax search with alpha-beta pruning and depth-biased scores.
///
/// The search plays moves on the board it is handed and takes every one of them back
/// before returning, so the board looks untouched afterwards. Nobody else may look at
/// the board while a search is running.
pub struct MinimaxSearch<T: Board> {
    use_alpha_beta_pruning: bool,
    depth_bias: i32,
    record_tree: bool,
    tree: Option<Tree<SearchNode<T::Move>>>,
    nodes_visited: u64,
}

impl<T: Board> Default for MinimaxSearch<T> {
    fn default() -> Self {
        MinimaxSearchBuilder::new().build()
    }
}

/// A builder for creating instances of `MinimaxSearch`.
pub struct MinimaxSearchBuilder<T: Board> {
    use_alpha_beta_pruning: bool,
    depth_bias: i32,
    record_tree: bool,
    _board: PhantomData<T>,
}

impl<T: Board> Default for MinimaxSearchBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Board> MinimaxSearchBuilder<T> {
    /// Creates a builder with pruning on, the default depth bias and no tree recording.
    pub fn new() -> Self {
        Self {
            use_alpha_beta_pruning: true,
            depth_bias: DEFAULT_DEPTH_BIAS,
            record_tree: false,
            _board: PhantomData,
        }
    }

    /// Enables or disables alpha-beta pruning. The chosen move does not depend on it,
    /// only the number of visited nodes does.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.use_alpha_beta_pruning = use_abp;
        self
    }

    /// Sets the per-ply score adjustment.
    pub fn with_depth_bias(mut self, depth_bias: i32) -> Self {
        self.depth_bias = depth_bias;
        self
    }

    /// Records the explored game tree during each search, see [`MinimaxSearch::tree`].
    pub fn with_tree_recording(mut self, record_tree: bool) -> Self {
        self.record_tree = record_tree;
        self
    }

    pub fn build(self) -> MinimaxSearch<T> {
        MinimaxSearch::new(self.use_alpha_beta_pruning, self.depth_bias, self.record_tree)
    }
}

impl<T: Board> MinimaxSearch<T> {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder<T> {
        MinimaxSearchBuilder::new()
    }

    /// Creates a new `MinimaxSearch`. Prefer [`MinimaxSearch::builder`].
    pub fn new(use_alpha_beta_pruning: bool, depth_bias: i32, record_tree: bool) -> Self {
        Self {
            use_alpha_beta_pruning,
            depth_bias,
            record_tree,
            tree: None,
            nodes_visited: 0,
        }
    }

    /// Number of positions visited by the last search, the root included.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// The game tree explored by the last search, if recording is enabled.
    pub fn tree(&self) -> Option<&Tree<SearchNode<T::Move>>> {
        self.tree.as_ref()
    }

    /// The line of play the last search expects, starting with its chosen move.
    ///
    /// Empty unless tree recording is enabled.
    pub fn principal_variation(&self) -> Vec<T::Move> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };

        let mut line = Vec::new();
        let mut node = tree.root();
        while let Some(best) = node.children().find(|child| child.value().chosen) {
            if let Some(mv) = best.value().prev_move {
                line.push(mv);
            }
            node = best;
        }
        line
    }

    /// Picks the AI's move: a full-width search with the AI to move from depth 0.
    ///
    /// The search runs on a private copy, so `board` is only ever read.
    pub fn choose_move(&mut self, board: &T) -> SearchResult<T::Move>
    where
        T: Clone,
    {
        let mut scratch = board.clone();
        self.search(&mut scratch, MAXIMIZING_MARKER, 0, i32::MIN, i32::MAX)
    }

    /// Searches the position for `marker`, who is about to move.
    ///
    /// `depth` is the number of plies already played below the caller's root and feeds the
    /// depth bias. Terminal positions return their evaluation and no move.
    pub fn search(
        &mut self,
        board: &mut T,
        marker: Marker,
        depth: u32,
        alpha: i32,
        beta: i32,
    ) -> SearchResult<T::Move> {
        self.nodes_visited = 0;
        self.tree = self
            .record_tree
            .then(|| Tree::new(SearchNode::root(marker, depth)));
        let root = self.tree.as_ref().map(|tree| tree.root().id());

        let result = self.search_node(board, marker, depth, alpha, beta, root);
        self.annotate(root, |node| node.score = Some(result.score));

        debug!(
            ?marker,
            best_move = ?result.best_move,
            score = result.score,
            nodes = self.nodes_visited,
            "search finished"
        );
        result
    }

    fn search_node(
        &mut self,
        board: &mut T,
        marker: Marker,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        parent: Option<NodeId>,
    ) -> SearchResult<T::Move> {
        self.nodes_visited += 1;

        let evaluation = board.evaluate(MAXIMIZING_MARKER);
        let moves = board.legal_moves();
        if evaluation.is_terminal() || moves.is_empty() {
            return SearchResult {
                best_move: None,
                score: evaluation.score(),
            };
        }

        let maximizing = marker == MAXIMIZING_MARKER;
        let bias = i32::try_from(depth)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.depth_bias);
        let mut best = SearchResult {
            best_move: None,
            score: if maximizing { i32::MIN } else { i32::MAX },
        };
        let mut best_node = None;

        for mv in moves {
            let child = self.record(parent, SearchNode::new(mv, marker, depth + 1));
            let score = {
                let mut scoped = ScopedMove::place(board, mv, marker);
                self.search_node(&mut scoped, marker.opponent(), depth + 1, alpha, beta, child)
                    .score
            };
            self.annotate(child, |node| node.score = Some(score));

            // The raw child score is compared with the already biased best.
            if maximizing && score > best.score {
                best = SearchResult {
                    best_move: Some(mv),
                    score: score.saturating_sub(bias),
                };
                best_node = child;
                alpha = alpha.max(best.score);
            } else if !maximizing && score < best.score {
                best = SearchResult {
                    best_move: Some(mv),
                    score: score.saturating_add(bias),
                };
                best_node = child;
                beta = beta.min(best.score);
            }

            if self.use_alpha_beta_pruning && beta <= alpha {
                trace!(?mv, depth, alpha, beta, "cutoff");
                self.annotate(child, |node| node.caused_cutoff = true);
                break;
            }
        }

        self.annotate(best_node, |node| node.chosen = true);
        best
    }

    fn record(&mut self, parent: Option<NodeId>, node: SearchNode<T::Move>) -> Option<NodeId> {
        let parent = parent?;
        let tree = self.tree.as_mut()?;
        let mut parent_node = tree.get_mut(parent)?;
        Some(parent_node.append(node).id())
    }

    fn annotate(&mut self, id: Option<NodeId>, update: impl FnOnce(&mut SearchNode<T::Move>)) {
        let (Some(tree), Some(id)) = (self.tree.as_mut(), id) else {
            return;
        };
        if let Some(mut node) = tree.get_mut(id) {
            update(node.value());
        }
    }
}

/// A marker placed for the duration of a scope. Dropping the guard empties the cell again,
/// on every exit path out of the scope.
struct ScopedMove<'a, T: Board> {
    board: &'a mut T,
    mv: T::Move,
}

impl<'a, T: Board> ScopedMove<'a, T> {
    fn place(board: &'a mut T, mv: T::Move, marker: Marker) -> Self {
        board.place(mv, marker);
        Self { board, mv }
    }
}

impl<T: Board> Deref for ScopedMove<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.board
    }
}

impl<T: Board> DerefMut for ScopedMove<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.board
    }
}

impl<T: Board> Drop for ScopedMove<'_, T> {
    fn drop(&mut self) {
        self.board.clear(self.mv);
    }
}

/// Chooses the AI's reply on `board` with the default search settings.
///
/// Returns `None` when the board is already won or full; the caller must then leave the
/// board alone.
#[instrument(level = "debug", skip(board), ret)]
pub fn choose_ai_move<T: Board + Clone>(board: &T) -> Option<T::Move> {
    MinimaxSearch::default().choose_move(board).best_move
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, DRAW_SCORE, GameState, LOSS_SCORE, Marker, WIN_SCORE};
    use crate::boards::tic_tac_toe::{Move, TicTacToeBoard};
    use crate::minimax::{MinimaxSearch, choose_ai_move};
    use crate::random::{SeededRandomGenerator, random_move};

    fn at(row: u8, col: u8) -> Move {
        Move::new(row, col).unwrap()
    }

    fn search() -> MinimaxSearch<TicTacToeBoard> {
        MinimaxSearch::default()
    }

    #[test]
    fn answers_a_centre_opening_with_a_corner() {
        // arrange
        let board = TicTacToeBoard::from_rows(["...", ".X.", "..."]);

        // act
        let best_move = choose_ai_move(&board);

        // assert
        assert_eq!(best_move, Some(at(0, 0)));
    }

    #[test]
    fn answers_opposite_corners_with_an_edge() {
        let board = TicTacToeBoard::from_rows(["X..", ".O.", "..X"]);
        assert_eq!(choose_ai_move(&board), Some(at(0, 1)));
    }

    #[test]
    fn takes_an_immediate_win() {
        // arrange
        let board = TicTacToeBoard::from_rows(["OO.", "XX.", "..."]);

        // act
        let result = search().choose_move(&board);

        // assert
        assert_eq!(result.best_move, Some(at(0, 2)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn blocks_an_open_line() {
        let board = TicTacToeBoard::from_rows(["XX.", ".O.", "..."]);
        assert_eq!(choose_ai_move(&board), Some(at(0, 2)));
    }

    #[test]
    fn prefers_the_faster_of_two_winning_moves() {
        // (0, 0) also forces a win, two plies later; it comes first in scan order.
        let board = TicTacToeBoard::from_rows(["...", "XOX", "XO."]);

        let result = search().choose_move(&board);
        assert_eq!(result.best_move, Some(at(0, 1)));
        assert_eq!(result.score, WIN_SCORE);

        let mut unbiased = MinimaxSearch::builder().with_depth_bias(0).build();
        assert_eq!(unbiased.choose_move(&board).best_move, Some(at(0, 0)));
    }

    #[test]
    fn terminal_positions_have_no_move() {
        let draw = TicTacToeBoard::from_rows(["XOX", "XOO", "OXX"]);
        let result = search().choose_move(&draw);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, DRAW_SCORE);

        let lost = TicTacToeBoard::from_rows(["XXX", "OO.", "..."]);
        let result = search().choose_move(&lost);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, LOSS_SCORE);
        assert_eq!(choose_ai_move(&lost), None);
    }

    #[test]
    fn search_leaves_the_board_as_it_found_it() {
        // arrange
        let mut board = TicTacToeBoard::from_rows(["X..", "...", "..."]);
        let before = board;
        let mut minimax = search();

        // act
        minimax.search(&mut board, Marker::Ai, 0, i32::MIN, i32::MAX);
        let after_ai = board;
        minimax.search(&mut board, Marker::Human, 3, i32::MIN, i32::MAX);

        // assert
        assert_eq!(after_ai, before);
        assert_eq!(board, before);
    }

    #[test]
    fn same_board_same_move() {
        let board = TicTacToeBoard::from_rows(["X.O", "...", "X.."]);
        let first = choose_ai_move(&board);
        let second = choose_ai_move(&board);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn pruning_changes_the_cost_not_the_answer() {
        // arrange
        let board = TicTacToeBoard::from_rows(["...", ".X.", "..."]);
        let mut pruned = search();
        let mut full = MinimaxSearch::builder()
            .with_alpha_beta_pruning(false)
            .build();

        // act
        let with_abp = pruned.choose_move(&board);
        let without_abp = full.choose_move(&board);

        // assert
        assert_eq!(with_abp, without_abp);
        assert_eq!(full.nodes_visited(), 55505);
        assert_eq!(pruned.nodes_visited(), 4391);
    }

    #[test]
    fn recorded_tree_follows_the_search() {
        // arrange
        let board = TicTacToeBoard::from_rows(["...", ".X.", "..."]);
        let mut minimax = MinimaxSearch::builder().with_tree_recording(true).build();

        // act
        let result = minimax.choose_move(&board);

        // assert
        let tree = minimax.tree().unwrap();
        let root = tree.root();
        assert!(root.value().is_root());
        assert_eq!(root.value().score, Some(result.score));
        assert_eq!(root.children().count(), 8);
        assert_eq!(tree.nodes().count() as u64, minimax.nodes_visited());
        assert!(tree.values().any(|node| node.caused_cutoff));

        let line = minimax.principal_variation();
        assert_eq!(line.first().copied(), result.best_move);
        let mut replay = board;
        let mut marker = Marker::Ai;
        for mv in line {
            assert_eq!(replay.get(mv), None);
            replay.apply_move(mv, marker);
            marker = marker.opponent();
        }
        assert!(replay.is_terminal());
    }

    #[test]
    fn no_tree_unless_asked() {
        let board = TicTacToeBoard::new();
        let mut minimax = search();
        minimax.choose_move(&board);
        assert!(minimax.tree().is_none());
        assert!(minimax.principal_variation().is_empty());
    }

    /// Plays every possible human line against the AI, collecting the final states.
    fn play_every_line(board: &mut TicTacToeBoard, to_move: Marker, outcomes: &mut Vec<GameState>) {
        if board.is_terminal() {
            outcomes.push(board.state());
            return;
        }
        match to_move {
            Marker::Human => {
                for mv in board.legal_moves() {
                    board.apply_move(mv, Marker::Human);
                    play_every_line(board, Marker::Ai, outcomes);
                    board.clear(mv);
                }
            }
            Marker::Ai => {
                let mv = choose_ai_move(&*board).unwrap();
                board.apply_move(mv, Marker::Ai);
                play_every_line(board, Marker::Human, outcomes);
                board.clear(mv);
            }
        }
    }

    #[test]
    fn never_loses_to_any_line_of_play() {
        for first in [Marker::Human, Marker::Ai] {
            let mut outcomes = Vec::new();
            play_every_line(&mut TicTacToeBoard::new(), first, &mut outcomes);

            assert!(!outcomes.is_empty());
            assert!(!outcomes.contains(&GameState::PlayerWin));
            assert!(!outcomes.contains(&GameState::Ongoing));
        }
    }

    #[test]
    fn never_loses_to_a_random_opponent() {
        let mut rng = SeededRandomGenerator::new(2024);
        for game in 0..50 {
            let mut board = TicTacToeBoard::new();
            let mut marker = if game % 2 == 0 { Marker::Human } else { Marker::Ai };
            while !board.is_terminal() {
                let mv = match marker {
                    Marker::Human => random_move(&board, &mut rng),
                    Marker::Ai => choose_ai_move(&board),
                };
                board.apply_move(mv.unwrap(), marker);
                marker = marker.opponent();
            }
            assert_ne!(board.state(), GameState::PlayerWin);
        }
    }
}
