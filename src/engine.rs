use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A direction to slide/merge tiles.
///
/// Discriminants follow the canonical opcode order of the action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Move {
    /// All four directions in opcode order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// Opcode of this direction (0..4).
    #[inline]
    pub fn index(self) -> usize { self as usize }

    /// Direction for an opcode, or `None` outside 0..4.
    #[inline]
    pub fn from_index(idx: usize) -> Option<Move> { Self::ALL.get(idx).copied() }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Right => "right",
            Move::Down => "down",
            Move::Left => "left",
        };
        f.write_str(name)
    }
}

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

/// Highest level a nibble can hold; two tiles at this level do not merge.
pub const MAX_LEVEL: Tile = 15;

struct Stores {
    shift_left: Box<[u64]>,
    shift_right: Box<[u64]>,
    shift_up: Box<[u64]>,
    shift_down: Box<[u64]>,
    reward_left: Box<[Reward]>,
    reward_right: Box<[Reward]>,
}

type BoardRaw = u64;
type Line = u64;

/// Level stored in a cell: 0 is empty, `k` is the tile `2^k`.
pub type Tile = u64;

/// Points gained from the merges of a single slide.
pub type Reward = u64;

/// Fibonacci growth used to weight a cell's level when scoring lines.
const FIBONACCI: [u64; 16] = [0, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987];

/// Packed 4x4 board as 16 4-bit levels in a `u64`.
///
/// Position 0 is the top-left cell and positions run row-major; position 0 is
/// stored in the most significant nibble. `Board` is `Copy`, so every trial
/// move made on a copy leaves the original untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board(BoardRaw);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board(0);

    /// Construct a `Board` from its raw packed representation.
    #[inline]
    pub fn from_raw(raw: BoardRaw) -> Self { Board(raw) }

    /// Borrow the raw packed `u64` for this `Board`.
    #[inline]
    pub fn raw(&self) -> BoardRaw { self.0 }

    /// Build a board from 16 levels in row-major order.
    ///
    /// Levels above [`MAX_LEVEL`] are truncated to their low nibble.
    ///
    /// ```
    /// use agent_2048::engine::Board;
    /// let b = Board::from_levels([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// assert_eq!(b.at(3), 4);
    /// assert_eq!(b.count_empty(), 12);
    /// ```
    pub fn from_levels(levels: [Tile; 16]) -> Self {
        levels
            .iter()
            .enumerate()
            .fold(Board::EMPTY, |board, (pos, &tile)| board.with_tile(pos, tile))
    }

    /// The 16 levels in row-major order.
    pub fn levels(self) -> [Tile; 16] {
        let mut out = [0; 16];
        for (pos, slot) in out.iter_mut().enumerate() {
            *slot = self.at(pos);
        }
        out
    }

    /// Level at `pos` (0..16, row-major).
    #[inline]
    pub fn at(self, pos: usize) -> Tile {
        debug_assert!(pos < 16);
        (self.0 >> (60 - (4 * pos))) & 0xf
    }

    /// Overwrite the level at `pos`.
    #[inline]
    pub fn set(&mut self, pos: usize, tile: Tile) {
        debug_assert!(pos < 16);
        let shift = 60 - (4 * pos);
        self.0 = (self.0 & !(0xf << shift)) | ((tile & 0xf) << shift);
    }

    /// Copy of this board with `tile` placed at `pos`.
    #[inline]
    pub fn with_tile(mut self, pos: usize, tile: Tile) -> Self {
        self.set(pos, tile);
        self
    }

    /// Return the board resulting from sliding/merging tiles in `dir`.
    ///
    /// ```
    /// use agent_2048::engine::{Board, Move};
    /// let b = Board::from_raw(0x2020_0000_0000_0000);
    /// assert_eq!(b.shift(Move::Left), Board::from_raw(0x3000_0000_0000_0000));
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self { self.shift_with_reward(dir).0 }

    /// Slide in `dir`, returning the resulting board and the merge reward.
    #[inline]
    pub fn shift_with_reward(self, dir: Move) -> (Self, Reward) {
        match dir {
            Move::Left | Move::Right => shift_rows(self, dir),
            Move::Up | Move::Down => shift_cols(self, dir),
        }
    }

    /// Slide this board in place.
    ///
    /// Returns `None` when the slide leaves the board unchanged (an illegal
    /// move), otherwise the reward: the face value of every tile produced by
    /// a merge. A legal slide without merges yields `Some(0)`.
    ///
    /// ```
    /// use agent_2048::engine::{Board, Move};
    /// let mut b = Board::from_levels([1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// assert_eq!(b.slide(Move::Left), Some(4));
    /// assert_eq!(b.slide(Move::Left), None);
    /// ```
    #[inline]
    pub fn slide(&mut self, dir: Move) -> Option<Reward> {
        let (next, reward) = self.shift_with_reward(dir);
        if next == *self {
            return None;
        }
        *self = next;
        Some(reward)
    }

    /// Rotate the board 90 degrees counter-clockwise in place.
    #[inline]
    pub fn rotate_left(&mut self) { self.0 = flip_rows(transpose(self.0)); }

    /// Rotate the board 90 degrees clockwise in place.
    #[inline]
    pub fn rotate_right(&mut self) { self.0 = mirror_rows(transpose(self.0)); }

    /// Return true if no move in any direction changes the board.
    ///
    /// ```
    /// use agent_2048::engine::Board;
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool { Move::ALL.iter().all(|&dir| self.shift(dir) == self) }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> u64 { 16 - count_non_empty(self) }

    /// Highest level present (0 on an empty board).
    #[inline]
    pub fn max_tile(self) -> Tile { (0..16).map(|pos| self.at(pos)).max().unwrap_or(0) }

    /// Face value at `pos` (0 if empty), e.g. 2, 4, 8, ...
    #[inline]
    pub fn tile_value(self, pos: usize) -> u32 { tile_value(self.at(pos)) }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:#018x})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.levels().iter().map(|&t| format_val(t)).collect();
        for (row, chunk) in cells.chunks(4).enumerate() {
            if row > 0 {
                writeln!(f, "-------------------------------")?;
            }
            writeln!(f, "{}", chunk.join("|"))?;
        }
        Ok(())
    }
}

impl From<BoardRaw> for Board { fn from(v: BoardRaw) -> Self { Board::from_raw(v) } }
impl From<Board> for BoardRaw { fn from(b: Board) -> Self { b.raw() } }

/// Initialize internal tables ahead of first use. Safe to call multiple times.
pub fn new() {
    let _ = stores();
}

/// Face value of a level (0 for an empty cell).
#[inline]
pub fn tile_value(tile: Tile) -> u32 {
    if tile == 0 { 0 } else { 1 << tile }
}

/// Map a level to its line-scoring weight (Fibonacci growth, 0 for empty).
#[inline]
pub fn level_to_score(tile: Tile) -> u64 { FIBONACCI[(tile & 0xf) as usize] }

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

/// Reverse the order of the four rows.
fn flip_rows(x: BoardRaw) -> BoardRaw {
    (x >> 48) | ((x >> 16) & 0xFFFF_0000) | ((x << 16) & 0xFFFF_0000_0000) | (x << 48)
}

/// Reverse the order of the cells within each row.
fn mirror_rows(x: BoardRaw) -> BoardRaw {
    let a = (x & 0xF000F000F000F000) >> 12;
    let b = (x & 0x0F000F000F000F00) >> 4;
    let c = (x & 0x00F000F000F000F0) << 4;
    let d = (x & 0x000F000F000F000F) << 12;
    a | b | c | d
}

pub(crate) fn extract_line(board: BoardRaw, line_idx: u64) -> Line {
    (board >> ((3 - line_idx) * 16)) & 0xffff
}

pub(crate) fn line_to_vec(line: Line) -> Vec<Tile> {
    (0..4).fold(Vec::new(), |mut tiles, tile_idx| {
        tiles.push(line >> ((3 - tile_idx) * 4) & 0xf);
        tiles
    })
}

static STORES: OnceLock<Stores> = OnceLock::new();

#[inline(always)]
fn stores() -> &'static Stores { STORES.get_or_init(create_stores) }

fn create_stores() -> Stores {
    // Allocate on the heap to avoid large stack frames
    let mut shift_left = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_right = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_up = vec![0u64; LINE_TABLE_SIZE];
    let mut shift_down = vec![0u64; LINE_TABLE_SIZE];
    let mut reward_left = vec![0 as Reward; LINE_TABLE_SIZE];
    let mut reward_right = vec![0 as Reward; LINE_TABLE_SIZE];

    for val in 0..LINE_TABLE_SIZE {
        let tiles = line_to_vec(val as Line);
        let (left, left_reward) = shift_vec_left(tiles.clone());
        let (right, right_reward) = shift_vec_right(tiles);
        shift_left[val] = vec_to_row(&left);
        shift_right[val] = vec_to_row(&right);
        shift_up[val] = vec_to_col(&left);
        shift_down[val] = vec_to_col(&right);
        reward_left[val] = left_reward;
        reward_right[val] = right_reward;
    }

    Stores {
        shift_left: shift_left.into_boxed_slice(),
        shift_right: shift_right.into_boxed_slice(),
        shift_up: shift_up.into_boxed_slice(),
        shift_down: shift_down.into_boxed_slice(),
        reward_left: reward_left.into_boxed_slice(),
        reward_right: reward_right.into_boxed_slice(),
    }
}

#[inline(always)]
fn get_line_entry<T: Copy>(table: &[T], idx: u16) -> T {
    debug_assert!((idx as usize) < LINE_TABLE_SIZE);
    unsafe { *table.get_unchecked(idx as usize) }
}

fn shift_rows(board: Board, move_dir: Move) -> (Board, Reward) {
    let s = stores();
    let (table, rewards): (&[u64], &[Reward]) = match move_dir {
        Move::Left => (&s.shift_left, &s.reward_left),
        Move::Right => (&s.shift_right, &s.reward_right),
        _ => unreachable!("shift_rows only handles left/right"),
    };
    (0..4).fold((Board::EMPTY, 0), |(new_board, reward), row_idx| {
        let row_val = extract_line(board.0, row_idx) as u16;
        let new_row_val = get_line_entry(table, row_val);
        (
            Board(new_board.0 | (new_row_val << (48 - (16 * row_idx)))),
            reward + get_line_entry(rewards, row_val),
        )
    })
}

fn shift_cols(board: Board, move_dir: Move) -> (Board, Reward) {
    let transpose_board = transpose(board.0);
    let s = stores();
    let (table, rewards): (&[u64], &[Reward]) = match move_dir {
        Move::Up => (&s.shift_up, &s.reward_left),
        Move::Down => (&s.shift_down, &s.reward_right),
        _ => unreachable!("shift_cols only handles up/down"),
    };
    (0..4).fold((Board::EMPTY, 0), |(new_board, reward), col_idx| {
        let col_val = extract_line(transpose_board, col_idx) as u16;
        let new_col_val = get_line_entry(table, col_val);
        (
            Board(new_board.0 | (new_col_val << (12 - (4 * col_idx)))),
            reward + get_line_entry(rewards, col_val),
        )
    })
}

fn vec_to_row(tiles: &[Tile]) -> Line {
    tiles[0] << 12 | tiles[1] << 8 | tiles[2] << 4 | tiles[3]
}

fn vec_to_col(tiles: &[Tile]) -> Line {
    tiles[0] << 48 | tiles[1] << 32 | tiles[2] << 16 | tiles[3]
}

fn shift_vec_right(vec: Vec<Tile>) -> (Vec<Tile>, Reward) {
    let rev_vec: Vec<Tile> = vec.into_iter().rev().collect();
    let (shifted, reward) = shift_vec_left(rev_vec);
    (shifted.into_iter().rev().collect(), reward)
}

fn shift_vec_left(mut vec: Vec<Tile>) -> (Vec<Tile>, Reward) {
    let mut reward = 0;
    for i in 0..4 {
        if let Some(merged) = calculate_left_shift(&mut vec[i..]) {
            reward += Reward::from(tile_value(merged));
        }
    }
    (vec, reward)
}

/// Pull the first tile of `slice` to the front, merging it with the next
/// equal tile. Returns the merged level when a merge happened.
fn calculate_left_shift(slice: &mut [Tile]) -> Option<Tile> {
    let mut acc = 0;
    let mut merged = None;
    for idx in 0..slice.len() {
        let val = slice[idx];
        if acc != 0 && acc == val && acc < MAX_LEVEL {
            slice[idx] = 0;
            acc += 1;
            merged = Some(acc);
            break;
        } else if acc != 0 && val != 0 {
            break;
        } else if acc == 0 && val != 0 {
            slice[idx] = 0;
            acc = val;
        };
    }
    slice[0] = acc;
    merged
}

fn count_non_empty(board: Board) -> u64 {
    let mut board_copy = board.0;
    board_copy |= board_copy >> 1;
    board_copy |= board_copy >> 2;
    board_copy &= 0x1111111111111111;
    board_copy.count_ones() as u64
}

fn format_val(tile: Tile) -> String {
    match tile {
        0 => " ".repeat(7),
        t => format!("{:^7}", tile_value(t)),
    }
}
