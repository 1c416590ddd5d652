//! agent-2048: move-selection agents for 2048
//!
//! This crate provides:
//! - A compact `Board` type with in-place `slide`, `rotate_left` and merge rewards (`engine`)
//! - Player and environment agents configured from `key=value` strings (`agent`)
//! - A line-monotonicity evaluation and a depth-limited search over the player's
//!   own moves (`heuristic`)
//! - An episode driver and rolling statistics for running games (`episode`, `statistics`)
//!
//! Quick start:
//! ```
//! use agent_2048::agent::{Agent, Player, RandomEnvironment};
//! use agent_2048::engine::Board;
//!
//! let mut env = RandomEnvironment::new("seed=42").unwrap();
//! let mut player = Player::new("strategy=heuristic seed=42").unwrap();
//!
//! let mut board = Board::EMPTY;
//! env.take_action(board).unwrap().apply(&mut board).unwrap();
//! env.take_action(board).unwrap().apply(&mut board).unwrap();
//!
//! // `None` means the player is stuck and the game is over.
//! while let Some(slide) = player.take_action(board) {
//!     slide.apply(&mut board).unwrap();
//!     match env.take_action(board) {
//!         Some(place) => { place.apply(&mut board).unwrap(); }
//!         None => break,
//!     }
//! }
//! assert!(board.is_game_over());
//! ```
//!
pub mod action;
pub mod agent;
pub mod engine;
pub mod episode;
pub mod heuristic;
pub mod statistics;
