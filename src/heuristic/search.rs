use log::trace;

use crate::engine::{Board, Move};

use super::{evaluate, BranchEval, SearchConfig, SearchStats};

/// Depth-limited search over the player's own move sequence.
///
/// Every simulated move runs on a fresh `Board` copy, so neither the caller's
/// board nor sibling branches are ever aliased.
pub struct TreeSearch {
    cfg: SearchConfig,
    stats: SearchStats,
}

impl TreeSearch {
    pub fn new() -> Self { Self::with_config(SearchConfig::default()) }

    pub fn with_config(cfg: SearchConfig) -> Self {
        crate::engine::new();
        Self { cfg, stats: SearchStats::default() }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig { &self.cfg }

    /// Pick the direction with the highest `reward + tree_search(after, depth)`.
    ///
    /// Ties go to the later direction in [`Move::ALL`]. Returns `None` when no
    /// direction is legal.
    ///
    /// ```
    /// use agent_2048::engine::{Board, Move};
    /// use agent_2048::heuristic::TreeSearch;
    /// let stuck = Board::from_levels([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
    /// assert_eq!(TreeSearch::new().best_move(stuck), None);
    /// ```
    pub fn best_move(&mut self, board: Board) -> Option<Move> {
        let mut best_score = 0;
        let mut best_move = None;
        for branch in self.branch_evals(board) {
            if branch.legal && branch.score >= best_score {
                best_score = branch.score;
                best_move = Some(branch.dir);
            }
        }
        best_move
    }

    /// Root score for each direction, in [`Move::ALL`] order.
    ///
    /// Illegal moves are marked `legal=false` with score 0.
    pub fn branch_evals(&mut self, board: Board) -> [BranchEval; 4] {
        let mut nodes = 0u64;
        let out = Move::ALL.map(|dir| {
            let mut after = board;
            nodes += 1;
            match after.slide(dir) {
                Some(reward) => {
                    let score = reward + self.search(after, self.cfg.depth, &mut nodes);
                    trace!("branch {dir}: reward {reward}, score {score}");
                    BranchEval { dir, score, legal: true }
                }
                None => BranchEval { dir, score: 0, legal: false },
            }
        });
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        out
    }

    /// Best score reachable from `board` within `depth` more simulated moves.
    ///
    /// At depth 0 this is [`evaluate`]. Otherwise each legal direction
    /// contributes `reward + tree_search(after, depth - 1)` and each illegal one
    /// contributes 0; the maximum is returned, so a stuck board scores 0.
    pub fn tree_search(&mut self, board: Board, depth: u32) -> u64 {
        let mut nodes = 0u64;
        let score = self.search(board, depth, &mut nodes);
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        score
    }

    /// Static evaluation under this search's configuration.
    #[inline]
    pub fn evaluate(&self, board: Board) -> u64 { evaluate(board, &self.cfg) }

    /// Statistics collected from the last call to [`Self::best_move`],
    /// [`Self::branch_evals`] or [`Self::tree_search`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.stats }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) { self.stats = SearchStats::default(); }

    fn search(&self, board: Board, depth: u32, nodes: &mut u64) -> u64 {
        if depth == 0 {
            return evaluate(board, &self.cfg);
        }
        let mut best_score = 0;
        for dir in Move::ALL {
            let mut after = board;
            *nodes += 1;
            let score = match after.slide(dir) {
                Some(reward) => reward + self.search(after, depth - 1, nodes),
                None => 0,
            };
            best_score = best_score.max(score);
        }
        best_score
    }
}

impl Default for TreeSearch { fn default() -> Self { Self::new() } }
