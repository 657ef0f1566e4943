use crate::board::Marker;

/// A single node of a recorded minimax search tree.
///
/// The root node describes the position the search started from and has no move. Every
/// other node describes one explored move and the score the search returned for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<M> {
    /// The move that led to this node from its parent. `None` for the root node.
    pub prev_move: Option<M>,
    /// The marker that played `prev_move`, or the marker to move at the root.
    pub marker: Marker,
    /// Plies from the root of the search.
    pub depth: u32,
    /// The score the search assigned to this node, once it has been explored.
    pub score: Option<i32>,
    /// Set on the child the search finally picked as its parent's best move.
    pub chosen: bool,
    /// Set when the siblings after this node were cut off by alpha-beta pruning.
    pub caused_cutoff: bool,
}

impl<M> SearchNode<M> {
    /// Creates the root node for a search where `marker` moves first.
    pub fn root(marker: Marker, depth: u32) -> Self {
        SearchNode {
            prev_move: None,
            marker,
            depth,
            score: None,
            chosen: false,
            caused_cutoff: false,
        }
    }

    /// Creates a node for `marker` playing `mv` at the given depth.
    pub fn new(mv: M, marker: Marker, depth: u32) -> Self {
        SearchNode {
            prev_move: Some(mv),
            marker,
            depth,
            score: None,
            chosen: false,
            caused_cutoff: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.prev_move.is_none()
    }
}
