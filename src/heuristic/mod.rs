//! Heuristic move selection: a depth-limited search over the player's own
//! moves, scored by a line-monotonicity evaluation.
//!
//! - [`evaluate`]: scores a position from monotonic runs along a set of
//!   4-cell tuples (each looked at under all four board rotations) plus a
//!   bonus per empty cell.
//! - [`TreeSearch`]: tries every direction, adds the immediate reward to the
//!   best score reachable in `depth` further simulated moves, and falls back
//!   to [`evaluate`] at the leaves.
//!
//! The environment's tile spawns are never modelled; this is not an
//! expectimax search.
//!
//! Quick start
//! ```
//! use agent_2048::engine::Board;
//! use agent_2048::heuristic::TreeSearch;
//!
//! let board = Board::from_levels([1, 1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
//! let mut search = TreeSearch::new();
//! assert!(search.best_move(board).is_some());
//! assert!(search.last_stats().nodes <= 20);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::Move;

mod evaluate;
mod search;

pub use evaluate::{evaluate, line_score, space_score};
pub use search::TreeSearch;

/// Scoring line used when none is configured: the top row.
pub const DEFAULT_TUPLE: [usize; 4] = [0, 1, 2, 3];

/// Configurable knobs for the heuristic search. Defaults match the stock player.
///
/// - `depth`: extra plies searched after the candidate move (0 evaluates the
///   candidate's result directly).
/// - `tuples`: scoring lines, each a sequence of 4 board positions.
/// - `space_weight`: bonus per empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub depth: u32,
    pub tuples: Vec<[usize; 4]>,
    pub space_weight: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 1, tuples: vec![DEFAULT_TUPLE], space_weight: 5 }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// Root score for one direction.
///
/// - `score` is the immediate reward plus the searched value of the result.
/// - `legal` is false when the move is a no-op for the current board; the
///   score is 0 then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchEval {
    pub dir: Move,
    pub score: u64,
    pub legal: bool,
}

/// Basic search stats for a single decision.
///
/// `nodes` counts simulated slides, legal or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub peak_nodes: u64,
}
