use crate::engine::{level_to_score, Board};

use super::SearchConfig;

/// Score a position: monotonic-run score of every tuple under each of the
/// four rotations, plus `space_weight` per empty cell.
///
/// The caller's board is not touched; rotations happen on a local copy.
///
/// ```
/// use agent_2048::engine::Board;
/// use agent_2048::heuristic::{evaluate, SearchConfig};
/// let b = Board::from_levels([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
/// // 2 + 3 + 5 for the increasing top row, 5 x 12 empty cells.
/// assert_eq!(evaluate(b, &SearchConfig::default()), 10 + 60);
/// ```
pub fn evaluate(board: Board, cfg: &SearchConfig) -> u64 {
    let mut work = board;
    let mut score = 0;
    for tuple in &cfg.tuples {
        for _ in 0..4 {
            score += line_score(work, tuple);
            work.rotate_left();
        }
    }
    score + space_score(work, cfg.space_weight)
}

/// Run score of one tuple.
///
/// Any two neighbouring cells with the same level (empty included) zero the
/// line. Otherwise the weights of cells 1..3 are summed and kept only if the
/// line is strictly increasing or strictly decreasing end to end.
pub fn line_score(board: Board, tuple: &[usize; 4]) -> u64 {
    let mut decreasing = true;
    let mut increasing = true;
    let mut score = 0;
    for pair in tuple.windows(2) {
        let (prev, cur) = (board.at(pair[0]), board.at(pair[1]));
        score += level_to_score(cur);
        match cur.cmp(&prev) {
            std::cmp::Ordering::Equal => return 0,
            std::cmp::Ordering::Greater => decreasing = false,
            std::cmp::Ordering::Less => increasing = false,
        }
    }
    if decreasing || increasing { score } else { 0 }
}

/// `weight` per empty cell.
#[inline]
pub fn space_score(board: Board, weight: u64) -> u64 { board.count_empty() * weight }

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SearchConfig { SearchConfig::default() }

    #[test]
    fn increasing_and_decreasing_lines_score() {
        let up = Board::from_levels([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(line_score(up, &[0, 1, 2, 3]), 2 + 3 + 5);
        let down = Board::from_levels([6, 4, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(line_score(down, &[0, 1, 2, 3]), 5 + 2 + 1);
    }

    #[test]
    fn equal_neighbours_zero_the_line() {
        let b = Board::from_levels([1, 2, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(line_score(b, &[0, 1, 2, 3]), 0);
        assert_eq!(line_score(Board::EMPTY, &[0, 1, 2, 3]), 0);
    }

    #[test]
    fn non_monotonic_line_scores_zero() {
        let b = Board::from_levels([1, 3, 2, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(line_score(b, &[0, 1, 2, 3]), 0);
    }

    #[test]
    fn full_board_without_monotonic_lines_is_zero() {
        // Every row and column zig-zags, so no rotation of the top row is monotonic.
        let b = Board::from_levels([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
        assert_eq!(b.count_empty(), 0);
        assert_eq!(evaluate(b, &cfg()), 0);
    }

    #[test]
    fn one_more_empty_cell_adds_the_space_weight() {
        let full = Board::from_levels([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
        // Position 10 is not on any rotation of the top row.
        let opened = full.with_tile(10, 0);
        assert_eq!(evaluate(opened, &cfg()), evaluate(full, &cfg()) + 5);
    }

    #[test]
    fn every_rotation_contributes() {
        let b = Board::from_levels([1, 2, 3, 4, 2, 0, 0, 5, 3, 0, 0, 6, 4, 5, 6, 7]);
        let top_row = 2 + 3 + 5; // 1,2,3,4
        let right_col = 8 + 13 + 21; // 4,5,6,7 top-down
        let bottom_row = 13 + 8 + 5; // 7,6,5,4 right-to-left
        let left_col = 3 + 2 + 1; // 4,3,2,1 bottom-up
        assert_eq!(evaluate(b, &cfg()), top_row + right_col + bottom_row + left_col + 5 * 4);
    }

    #[test]
    fn evaluate_does_not_touch_the_board() {
        let b = Board::from_raw(0x1234_5678_9abc_def1);
        let copy = b;
        let _ = evaluate(b, &cfg());
        assert_eq!(b, copy);
    }

    #[test]
    fn multiple_tuples_accumulate() {
        let b = Board::from_levels([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut two = cfg();
        two.tuples.push([0, 1, 2, 3]);
        assert_eq!(evaluate(b, &two), 2 * 10 + 60);
    }
}
