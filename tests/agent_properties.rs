//! Decision properties of the player strategies and the environment.

use agent_2048::action::Action;
use agent_2048::agent::{Agent, Player, RandomEnvironment, HIGH_TILE, LOW_TILE};
use agent_2048::engine::{Board, Move, Tile};
use agent_2048::heuristic::{evaluate, SearchConfig};
use proptest::prelude::*;

const STRATEGIES: [&str; 3] = ["random", "greedy", "heuristic"];

fn board_strategy() -> impl Strategy<Value = Board> {
    proptest::array::uniform16(0..10 as Tile).prop_map(Board::from_levels)
}

fn legal_moves(board: Board) -> Vec<Move> {
    Move::ALL.iter().copied().filter(|&dir| { let mut b = board; b.slide(dir).is_some() }).collect()
}

fn stuck_boards() -> Vec<Board> {
    vec![
        Board::from_levels([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]),
        Board::from_levels([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 1]),
        Board::from_levels([3, 1, 3, 1, 5, 2, 5, 2, 3, 1, 3, 1, 6, 7, 6, 7]),
    ]
}

// =============================================================================
// Strategy dispatch
// =============================================================================

proptest! {
    #[test]
    fn every_strategy_picks_a_legal_move_when_one_exists(board in board_strategy(), seed in 0u64..1000) {
        let legal = legal_moves(board);
        prop_assume!(!legal.is_empty());
        for s in STRATEGIES {
            let mut player = Player::new(&format!("strategy={s} seed={seed}")).unwrap();
            let action = player.take_action(board);
            let dir = action.and_then(|a| a.direction());
            prop_assert!(dir.is_some(), "{} returned {:?}", s, action);
            prop_assert!(legal.contains(&dir.unwrap()));
        }
    }

    #[test]
    fn greedy_reward_is_the_best_immediate_reward(board in board_strategy()) {
        let player = Player::new("strategy=greedy").unwrap();
        let best = Move::ALL.iter().filter_map(|&dir| { let mut b = board; b.slide(dir) }).max();
        match player.greedy_action(board) {
            Some(Action::Slide(dir)) => {
                let mut b = board;
                prop_assert_eq!(b.slide(dir), best);
            }
            other => {
                prop_assert_eq!(other, None);
                prop_assert_eq!(best, None);
            }
        }
    }

    #[test]
    fn deciding_never_mutates_the_callers_board(board in board_strategy()) {
        let original = board;
        for s in STRATEGIES {
            let mut player = Player::new(&format!("strategy={s}")).unwrap();
            player.take_action(board);
            prop_assert_eq!(board, original);
        }
        let mut copy = board;
        let _ = copy.slide(Move::Left);
        prop_assert_eq!(board, original);
    }

    #[test]
    fn evaluation_grows_by_five_per_opened_interior_cell(board in board_strategy(), pos in prop::sample::select(vec![5usize, 6, 9, 10])) {
        // Interior cells never lie on a rotation of the top row.
        let filled = board.with_tile(pos, 3);
        let opened = board.with_tile(pos, 0);
        let cfg = SearchConfig::default();
        prop_assert_eq!(evaluate(opened, &cfg), evaluate(filled, &cfg) + 5);
    }
}

#[test]
fn every_strategy_returns_none_when_stuck() {
    for board in stuck_boards() {
        assert!(legal_moves(board).is_empty());
        for s in STRATEGIES {
            let mut player = Player::new(&format!("strategy={s}")).unwrap();
            assert_eq!(player.take_action(board), None, "{s} on {board:?}");
        }
    }
}

// =============================================================================
// Evaluation scenarios
// =============================================================================

#[test]
fn single_increasing_row_scores_run_plus_space() {
    let board = Board::from_levels([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(evaluate(board, &SearchConfig::default()), (2 + 3 + 5) + 5 * 12);
}

#[test]
fn full_board_without_monotonic_lines_scores_zero() {
    for board in stuck_boards().into_iter().take(1) {
        assert_eq!(evaluate(board, &SearchConfig::default()), 0);
    }
}

// =============================================================================
// Environment
// =============================================================================

#[test]
fn high_tile_share_converges_to_a_tenth() {
    let mut env = RandomEnvironment::new("seed=2024").unwrap();
    let draws = 20_000;
    let mut high = 0;
    for _ in 0..draws {
        match env.take_action(Board::EMPTY) {
            Some(Action::Place { tile, .. }) if tile == HIGH_TILE => high += 1,
            Some(Action::Place { tile, .. }) => assert_eq!(tile, LOW_TILE),
            other => panic!("unexpected {other:?}"),
        }
    }
    let share = high as f64 / draws as f64;
    assert!((share - 0.10).abs() < 0.01, "share {share}");
}

#[test]
fn placements_always_land_on_empty_cells() {
    let mut env = RandomEnvironment::new("seed=77").unwrap();
    let mut board = Board::EMPTY;
    for _ in 0..16 {
        let action = env.take_action(board).unwrap();
        match action {
            Action::Place { position, .. } => assert_eq!(board.at(position), 0),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(action.apply(&mut board), Some(0));
    }
    assert_eq!(board.count_empty(), 0);
    assert_eq!(env.take_action(board), None);
}

#[test]
fn positions_are_spread_uniformly() {
    let mut env = RandomEnvironment::new("seed=5").unwrap();
    let mut hits = [0u32; 16];
    for _ in 0..16_000 {
        if let Some(Action::Place { position, .. }) = env.take_action(Board::EMPTY) {
            hits[position] += 1;
        }
    }
    assert!(hits.iter().all(|&h| (800..1200).contains(&h)), "{hits:?}");
}
