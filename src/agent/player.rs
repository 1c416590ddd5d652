use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::engine::{Board, Move};
use crate::heuristic::{SearchConfig, SearchStats, TreeSearch};

use super::{seeded_rng, Agent, AgentError, Meta};

/// How the player picks its slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// First legal direction of a uniformly shuffled order.
    #[default]
    Random,
    /// Highest immediate reward.
    Greedy,
    /// Highest reward plus searched value of the resulting position.
    Heuristic,
}

impl FromStr for Strategy {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "greedy" => Ok(Strategy::Greedy),
            "heuristic" => Ok(Strategy::Heuristic),
            other => Err(AgentError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Heuristic => "heuristic",
        };
        f.write_str(name)
    }
}

/// The sliding player.
///
/// Recognised properties: `strategy` (random, greedy or heuristic; default
/// random), `depth` (extra search plies for heuristic play; default 1) and
/// `seed`. The strategy is fixed at construction.
pub struct Player {
    meta: Meta,
    strategy: Strategy,
    rng: StdRng,
    opcode: [Move; 4],
    search: TreeSearch,
}

impl Player {
    pub fn new(args: &str) -> Result<Self, AgentError> {
        let meta = Meta::parse(&format!("name=dummy role=player {args}"))?;
        let strategy = match meta.property("strategy") {
            Ok(raw) => raw.parse()?,
            Err(_) => Strategy::default(),
        };
        let depth = meta.value_or("depth", SearchConfig::default().depth)?;
        let rng = seeded_rng(&meta)?;
        Ok(Self {
            meta,
            strategy,
            rng,
            opcode: Move::ALL,
            search: TreeSearch::with_config(SearchConfig::default().with_depth(depth)),
        })
    }

    #[inline]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// First legal direction in a freshly shuffled order.
    pub fn random_action(&mut self, board: Board) -> Option<Action> {
        self.opcode.shuffle(&mut self.rng);
        self.opcode
            .iter()
            .copied()
            .find(|&dir| board.shift(dir) != board)
            .map(Action::Slide)
    }

    /// Legal direction with the highest immediate reward; ties go to the
    /// later direction in [`Move::ALL`].
    pub fn greedy_action(&self, board: Board) -> Option<Action> {
        let mut max_reward = 0;
        let mut best_move = None;
        for dir in Move::ALL {
            let mut after = board;
            if let Some(reward) = after.slide(dir) {
                if reward >= max_reward {
                    max_reward = reward;
                    best_move = Some(dir);
                }
            }
        }
        best_move.map(Action::Slide)
    }

    /// Best direction according to [`TreeSearch::best_move`].
    pub fn heuristic_action(&mut self, board: Board) -> Option<Action> {
        self.search.best_move(board).map(Action::Slide)
    }

    /// Search statistics of the last heuristic decision.
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.search.last_stats() }
}

impl Agent for Player {
    fn meta(&self) -> &Meta { &self.meta }

    fn meta_mut(&mut self) -> &mut Meta { &mut self.meta }

    fn take_action(&mut self, board: Board) -> Option<Action> {
        let action = match self.strategy {
            Strategy::Random => self.random_action(board),
            Strategy::Greedy => self.greedy_action(board),
            Strategy::Heuristic => self.heuristic_action(board),
        };
        match action {
            Some(action) => debug!("{} ({}) chose {action}", self.name(), self.strategy),
            None => debug!("{} ({}) has no legal move", self.name(), self.strategy),
        }
        action
    }
}
