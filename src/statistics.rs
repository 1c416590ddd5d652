//! Rolling summaries over finished episodes.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::engine::{tile_value, Reward, Tile};
use crate::episode::Episode;

/// The figures kept per finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Outcome {
    score: Reward,
    max_tile: Tile,
    moves: u32,
    steps: usize,
    duration: Duration,
}

/// Accumulates episode outcomes for periodic reports.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    outcomes: Vec<Outcome>,
}

/// How often a max tile was reached within a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileRate {
    /// Face value of the tile, e.g. 2048.
    pub tile: u32,
    /// Share of episodes that reached at least this tile, in percent.
    pub reached: f64,
    /// Share of episodes that ended with exactly this max tile, in percent.
    pub ended: f64,
}

/// Summary of the last `episodes` games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Index of the last episode covered (1-based, over the whole run).
    pub total: usize,
    pub episodes: usize,
    pub avg_score: f64,
    pub max_score: Reward,
    pub avg_moves: f64,
    /// Actions (both sides) per second of play.
    pub ops: f64,
    pub tiles: Vec<TileRate>,
}

impl Statistics {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, episode: &Episode) {
        self.outcomes.push(Outcome {
            score: episode.score,
            max_tile: episode.max_tile(),
            moves: episode.player_moves(),
            steps: episode.steps.len(),
            duration: episode.duration,
        });
    }

    /// Number of episodes recorded so far.
    #[inline]
    pub fn len(&self) -> usize { self.outcomes.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.outcomes.is_empty() }

    /// Summary of the most recent `block` episodes (all of them if fewer).
    /// `None` when nothing was recorded or `block` is 0.
    pub fn summary(&self, block: usize) -> Option<Summary> {
        let n = block.min(self.outcomes.len());
        if n == 0 {
            return None;
        }
        let recent = &self.outcomes[self.outcomes.len() - n..];

        let sum_score: Reward = recent.iter().map(|o| o.score).sum();
        let max_score = recent.iter().map(|o| o.score).max().unwrap_or(0);
        let sum_moves: u64 = recent.iter().map(|o| u64::from(o.moves)).sum();
        let steps: usize = recent.iter().map(|o| o.steps).sum();
        let elapsed: Duration = recent.iter().map(|o| o.duration).sum();

        let mut counts: BTreeMap<Tile, usize> = BTreeMap::new();
        for o in recent {
            *counts.entry(o.max_tile).or_insert(0) += 1;
        }
        let mut remaining = n;
        let tiles = counts
            .into_iter()
            .map(|(tile, count)| {
                let rate = TileRate {
                    tile: tile_value(tile),
                    reached: percent(remaining, n),
                    ended: percent(count, n),
                };
                remaining -= count;
                rate
            })
            .collect();

        Some(Summary {
            total: self.outcomes.len(),
            episodes: n,
            avg_score: sum_score as f64 / n as f64,
            max_score,
            avg_moves: sum_moves as f64 / n as f64,
            ops: steps as f64 / elapsed.as_secs_f64().max(1e-9),
            tiles,
        })
    }
}

fn percent(part: usize, whole: usize) -> f64 { part as f64 * 100.0 / whole as f64 }

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\tavg = {:.0}, max = {}, moves = {:.1}, ops = {:.0}",
            self.total, self.avg_score, self.max_score, self.avg_moves, self.ops
        )?;
        for rate in &self.tiles {
            writeln!(f, "\t{}\t{:.1}%\t({:.1}%)", rate.tile, rate.reached, rate.ended)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;
    use crate::episode::EndReason;

    fn episode(score: Reward, max_tile: Tile) -> Episode {
        Episode {
            steps: Vec::new(),
            board: Board::EMPTY.with_tile(0, max_tile),
            score,
            end: EndReason::PlayerStuck,
            duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn empty_statistics_have_no_summary() {
        let stats = Statistics::new();
        assert!(stats.is_empty());
        assert_eq!(stats.summary(10), None);
    }

    #[test]
    fn summary_covers_the_last_block() {
        let mut stats = Statistics::new();
        for (score, tile) in [(100, 9), (400, 10), (200, 10), (300, 11)] {
            stats.push(&episode(score, tile));
        }
        let s = stats.summary(3).unwrap();
        assert_eq!(s.total, 4);
        assert_eq!(s.episodes, 3);
        assert_eq!(s.max_score, 400);
        assert!((s.avg_score - 300.0).abs() < 1e-9);
        let tiles: Vec<u32> = s.tiles.iter().map(|t| t.tile).collect();
        assert_eq!(tiles, vec![1024, 2048]);
        assert!((s.tiles[0].reached - 100.0).abs() < 1e-9);
        assert!((s.tiles[1].reached - 100.0 / 3.0).abs() < 1e-9);
        assert!((s.tiles[0].ended - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn display_lists_every_tile() {
        let mut stats = Statistics::new();
        stats.push(&episode(10, 3));
        stats.push(&episode(20, 4));
        let text = stats.summary(2).unwrap().to_string();
        assert!(text.starts_with("2\tavg = 15, max = 20"));
        assert!(text.contains("\t8\t100.0%\t(50.0%)"));
        assert!(text.contains("\t16\t50.0%\t(50.0%)"));
    }
}
