//! One game between a player and an environment.

use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::agent::Agent;
use crate::engine::{Board, Reward, Tile};

/// Which side made a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Environment,
}

/// A move taken during an episode and the reward it earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub actor: Actor,
    pub action: Action,
    pub reward: Reward,
}

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The player had no legal slide.
    PlayerStuck,
    /// The environment found no empty cell.
    BoardFull,
    /// An agent answered with an action the board rejected.
    IllegalAction(Actor),
    /// The player reported a win.
    Won,
    /// The configured move limit was reached.
    MoveLimit,
}

/// Number of tiles the environment places before the player's first move.
pub const OPENING_TILES: usize = 2;

/// Record of a finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub steps: Vec<Step>,
    pub board: Board,
    pub score: Reward,
    pub end: EndReason,
    pub duration: Duration,
}

impl Episode {
    /// Play one game to the end.
    ///
    /// The environment opens with [`OPENING_TILES`] placements, then player
    /// and environment alternate. `limit` caps the number of player moves.
    ///
    /// ```
    /// use agent_2048::agent::{Player, RandomEnvironment};
    /// use agent_2048::episode::{EndReason, Episode};
    ///
    /// let mut player = Player::new("strategy=greedy seed=1").unwrap();
    /// let mut env = RandomEnvironment::new("seed=1").unwrap();
    /// let ep = Episode::play(&mut player, &mut env, Some(10));
    /// assert!(ep.player_moves() <= 10);
    /// assert!(ep.end == EndReason::MoveLimit || ep.end == EndReason::PlayerStuck);
    /// ```
    pub fn play(player: &mut dyn Agent, env: &mut dyn Agent, limit: Option<u32>) -> Episode {
        let start = Instant::now();
        player.open_episode("");
        env.open_episode("");

        let mut game = Game::default();
        let end = game.run(player, env, limit);

        let flag = format!("{end:?}");
        player.close_episode(&flag);
        env.close_episode(&flag);

        let episode = Episode { steps: game.steps, board: game.board, score: game.score, end, duration: start.elapsed() };
        info!(
            "episode over ({:?}): score {}, max tile {}, {} moves",
            episode.end,
            episode.score,
            episode.max_tile_value(),
            episode.player_moves()
        );
        episode
    }

    /// Number of slides made by the player.
    pub fn player_moves(&self) -> u32 {
        self.steps.iter().filter(|s| s.actor == Actor::Player).count() as u32
    }

    /// Highest level on the final board.
    #[inline]
    pub fn max_tile(&self) -> Tile { self.board.max_tile() }

    /// Face value of the highest tile on the final board.
    #[inline]
    pub fn max_tile_value(&self) -> u32 { crate::engine::tile_value(self.max_tile()) }
}

#[derive(Default)]
struct Game {
    board: Board,
    score: Reward,
    steps: Vec<Step>,
}

impl Game {
    fn run(&mut self, player: &mut dyn Agent, env: &mut dyn Agent, limit: Option<u32>) -> EndReason {
        for _ in 0..OPENING_TILES {
            if let Err(end) = self.turn(env, Actor::Environment) {
                return end;
            }
        }
        let mut moves = 0u32;
        loop {
            if limit.is_some_and(|l| moves >= l) {
                return EndReason::MoveLimit;
            }
            if let Err(end) = self.turn(player, Actor::Player) {
                return end;
            }
            moves += 1;
            if player.check_for_win(self.board) {
                return EndReason::Won;
            }
            if let Err(end) = self.turn(env, Actor::Environment) {
                return end;
            }
        }
    }

    fn turn(&mut self, agent: &mut dyn Agent, actor: Actor) -> Result<(), EndReason> {
        let action = agent.take_action(self.board).ok_or(match actor {
            Actor::Player => EndReason::PlayerStuck,
            Actor::Environment => EndReason::BoardFull,
        })?;
        let reward = action.apply(&mut self.board).ok_or_else(|| {
            warn!("{} proposed illegal {action} on {:?}", agent.name(), self.board);
            EndReason::IllegalAction(actor)
        })?;
        self.score += reward;
        self.steps.push(Step { actor, action, reward });
        Ok(())
    }
}
