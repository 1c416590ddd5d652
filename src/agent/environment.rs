use log::trace;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::engine::{Board, Tile};

use super::{seeded_rng, Agent, AgentError, Meta};

/// Level of the common spawn (the 2-tile), drawn 9 times out of 10.
pub const LOW_TILE: Tile = 1;
/// Level of the rare spawn (the 4-tile), drawn 1 time out of 10.
pub const HIGH_TILE: Tile = 2;

/// Environment that drops a new tile on a uniformly chosen empty cell.
pub struct RandomEnvironment {
    meta: Meta,
    rng: StdRng,
    space: [usize; 16],
    popup: Uniform<u32>,
}

impl RandomEnvironment {
    pub fn new(args: &str) -> Result<Self, AgentError> {
        let meta = Meta::parse(&format!("name=random role=environment {args}"))?;
        let rng = seeded_rng(&meta)?;
        Ok(Self { meta, rng, space: std::array::from_fn(|pos| pos), popup: Uniform::new(0, 10) })
    }
}

impl Agent for RandomEnvironment {
    fn meta(&self) -> &Meta { &self.meta }

    fn meta_mut(&mut self) -> &mut Meta { &mut self.meta }

    /// Place a tile on the first empty cell of a shuffled cell order, or
    /// `None` when the board is full.
    fn take_action(&mut self, board: Board) -> Option<Action> {
        self.space.shuffle(&mut self.rng);
        let position = self.space.iter().copied().find(|&pos| board.at(pos) == 0)?;
        let tile = if self.popup.sample(&mut self.rng) < 9 { LOW_TILE } else { HIGH_TILE };
        trace!("spawn level {tile} at {position}");
        Some(Action::Place { position, tile })
    }
}
