//! Agents that act on a board: the player and the tile-spawning environment.
//!
//! Both implement [`Agent`]. Each owns its own seeded random engine; an agent
//! instance is meant to be driven from one thread at a time.
//!
//! ```
//! use agent_2048::agent::{Agent, Player, RandomEnvironment};
//! use agent_2048::engine::Board;
//!
//! let mut env = RandomEnvironment::new("seed=1").unwrap();
//! let mut player = Player::new("strategy=greedy seed=1").unwrap();
//! let mut board = Board::EMPTY;
//! for _ in 0..2 {
//!     let place = env.take_action(board).unwrap();
//!     place.apply(&mut board).unwrap();
//! }
//! let slide = player.take_action(board).unwrap();
//! assert!(slide.apply(&mut board).is_some());
//! assert_eq!(player.name(), "dummy");
//! assert_eq!(env.role(), "environment");
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action::Action;
use crate::engine::Board;

mod environment;
mod meta;
mod player;

pub use environment::{RandomEnvironment, HIGH_TILE, LOW_TILE};
pub use meta::{AgentError, Meta};
pub use player::{Player, Strategy};

/// Seed used when an agent is configured without `seed=`.
pub const DEFAULT_SEED: u64 = 5489;

/// Shared capability of every agent.
pub trait Agent {
    fn meta(&self) -> &Meta;
    fn meta_mut(&mut self) -> &mut Meta;

    /// Choose an action for `board`, or `None` when no action is possible.
    fn take_action(&mut self, board: Board) -> Option<Action>;

    fn open_episode(&mut self, _flag: &str) {}
    fn close_episode(&mut self, _flag: &str) {}
    fn check_for_win(&self, _board: Board) -> bool { false }

    fn property(&self, key: &str) -> Result<&str, AgentError> { self.meta().property(key) }

    fn notify(&mut self, msg: &str) -> Result<(), AgentError> { self.meta_mut().notify(msg) }

    fn name(&self) -> &str { self.property("name").unwrap_or("unknown") }

    fn role(&self) -> &str { self.property("role").unwrap_or("unknown") }
}

/// Random engine seeded from `seed=` (or [`DEFAULT_SEED`]).
pub(crate) fn seeded_rng(meta: &Meta) -> Result<StdRng, AgentError> {
    Ok(StdRng::seed_from_u64(meta.value_or("seed", DEFAULT_SEED)?))
}
