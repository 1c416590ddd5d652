//! Actions produced by agents.
//!
//! A player answers with [`Action::Slide`], the environment with
//! [`Action::Place`]. "No legal action" is expressed as `Option::<Action>::None`
//! by every [`crate::agent::Agent::take_action`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::{Board, Move, Reward, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Slide every tile in the given direction.
    Slide(Move),
    /// Place a tile of level `tile` on the empty cell `position`.
    Place { position: usize, tile: Tile },
}

impl Action {
    /// Apply this action to `board`.
    ///
    /// Returns `None` when the action is not legal on `board` (a slide that
    /// changes nothing, or a placement onto an occupied or out-of-range cell);
    /// the board is left unchanged in that case. Placements yield reward 0.
    ///
    /// ```
    /// use agent_2048::action::Action;
    /// use agent_2048::engine::{Board, Move};
    /// let mut b = Board::EMPTY;
    /// assert_eq!(Action::Place { position: 0, tile: 1 }.apply(&mut b), Some(0));
    /// assert_eq!(Action::Place { position: 0, tile: 1 }.apply(&mut b), None);
    /// assert_eq!(Action::Slide(Move::Right).apply(&mut b), Some(0));
    /// ```
    pub fn apply(&self, board: &mut Board) -> Option<Reward> {
        match *self {
            Action::Slide(dir) => board.slide(dir),
            Action::Place { position, tile } => {
                if position >= 16 || board.at(position) != 0 {
                    return None;
                }
                board.set(position, tile);
                Some(0)
            }
        }
    }

    /// The slide direction, if this is a slide.
    pub fn direction(&self) -> Option<Move> {
        match *self {
            Action::Slide(dir) => Some(dir),
            Action::Place { .. } => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Slide(dir) => write!(f, "slide {dir}"),
            Action::Place { position, tile } => write!(f, "place {} at {position}", crate::engine::tile_value(*tile)),
        }
    }
}
