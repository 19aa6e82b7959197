//! The [`Position`] type: a complete, compact Connect Four game state.

use crate::bitboard::{self, Bitboard, BOARD_MASK, BOTTOM_MASK};
use crate::{utils, HEIGHT, NUM_CELLS, WIDTH};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter};

/// A Connect Four position, always seen from the side to move.
///
/// Positions are small `Copy` values. Playing a move consumes a position and
/// returns its successor, so a search can keep the parent on its stack.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Position {
    /// Stones of the side to move.
    current: Bitboard,
    /// Stones of both players.
    mask: Bitboard,
    moves: usize,
}

/// A move sequence which could not be played in full.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display(fmt = "invalid move {} in sequence", index)]
pub struct ParsePositionError {
    /// Zero-based index of the first move that could not be played.
    pub index: usize,
}

impl Position {
    /// The empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stones played since the beginning of the game.
    #[inline]
    pub fn moves(self) -> usize {
        self.moves
    }

    /// Every cell of a column.
    #[inline]
    pub fn column_mask(col: usize) -> Bitboard {
        bitboard::column_mask(col)
    }

    /// Whether a column still has room for a stone.
    #[inline]
    pub fn can_play(self, col: usize) -> bool {
        self.mask & bitboard::top_mask_col(col) == 0
    }

    /// Play a one-hot move for the side to move.
    /// `mv` must be one of the cells returned by [`Position::possible`].
    #[inline]
    pub fn play(self, mv: Bitboard) -> Self {
        Self {
            current: self.current ^ self.mask,
            mask: self.mask | mv,
            moves: self.moves + 1,
        }
    }

    /// Drop a stone in a column. The column must be playable.
    #[inline]
    pub fn play_col(self, col: usize) -> Self {
        self.play((self.mask + bitboard::bottom_mask_col(col)) & bitboard::column_mask(col))
    }

    /// Play a sequence of 1-based column digits, such as `"4453"`.
    ///
    /// Stops before the first character which is not a column, names a full
    /// column, or would win the game. Returns the number of moves played.
    pub fn play_sequence(&mut self, sequence: &str) -> usize {
        for (i, c) in sequence.chars().enumerate() {
            let col = match c.to_digit(10) {
                Some(d) if d >= 1 && d as usize <= WIDTH => d as usize - 1,
                _ => return i,
            };
            if !self.can_play(col) || self.is_winning_move(col) {
                return i;
            }
            *self = self.play_col(col);
        }
        sequence.chars().count()
    }

    /// Whether dropping a stone in `col` wins immediately.
    #[inline]
    pub fn is_winning_move(self, col: usize) -> bool {
        self.winning_position() & self.possible() & bitboard::column_mask(col) != 0
    }

    /// Whether the side to move can win with its next stone.
    #[inline]
    pub fn can_win_next(self) -> bool {
        self.winning_position() & self.possible() != 0
    }

    /// The cells where a stone can be dropped.
    #[inline]
    pub fn possible(self) -> Bitboard {
        (self.mask + BOTTOM_MASK) & BOARD_MASK
    }

    /// The playable cells which do not let the opponent win on their next move.
    ///
    /// Assumes the side to move cannot win immediately. An empty result means
    /// the position is lost: the opponent has two threats, or every move
    /// unlocks one.
    pub fn possible_non_losing_moves(self) -> Bitboard {
        let mut possible = self.possible();
        let opponent_win = self.opponent_winning_position();

        let forced_moves = possible & opponent_win;
        if forced_moves != 0 {
            if forced_moves & (forced_moves - 1) != 0 {
                return 0;
            }
            possible = forced_moves;
        }

        // Never play directly below an opponent's winning cell.
        possible & !(opponent_win >> 1)
    }

    /// A unique key for this position, suitable for a transposition table.
    /// Fits in `WIDTH * (HEIGHT + 1)` bits.
    #[inline]
    pub fn key(self) -> u64 {
        self.current + self.mask
    }

    /// A compact base-3 key, identical for a position and its mirror image.
    ///
    /// Each stone is a digit (1 for the side to move, 2 for the opponent) and
    /// each column ends with a 0 digit. Only meaningful for shallow positions:
    /// the encoding overflows 64 bits once roughly 33 stones are played.
    pub fn key3(self) -> u64 {
        let forward = (0..WIDTH).fold(0, |key, col| self.partial_key3(key, col));
        let reverse = (0..WIDTH).rev().fold(0, |key, col| self.partial_key3(key, col));
        forward.min(reverse) / 3
    }

    fn partial_key3(self, mut key: u64, col: usize) -> u64 {
        let mut cell = bitboard::bottom_mask_col(col);
        while cell & self.mask != 0 {
            let digit = if cell & self.current != 0 { 1 } else { 2 };
            key = key.wrapping_mul(3).wrapping_add(digit);
            cell <<= 1;
        }
        key.wrapping_mul(3)
    }

    /// Heuristic value of a move: the number of winning cells it creates.
    #[inline]
    pub fn move_score(self, mv: Bitboard) -> i32 {
        bitboard::compute_winning_position(self.current | mv, self.mask).count_ones() as i32
    }

    /// Empty cells which would complete an alignment for the side to move.
    #[inline]
    fn winning_position(self) -> Bitboard {
        bitboard::compute_winning_position(self.current, self.mask)
    }

    /// Empty cells which would complete an alignment for the opponent.
    #[inline]
    fn opponent_winning_position(self) -> Bitboard {
        bitboard::compute_winning_position(self.current ^ self.mask, self.mask)
    }

    /// Whether every cell is occupied.
    #[inline]
    pub fn is_full(self) -> bool {
        self.moves == NUM_CELLS
    }

    /// Stones of the player who moved first.
    fn first_player_stones(self) -> Bitboard {
        if self.moves % 2 == 0 {
            self.current
        } else {
            self.current ^ self.mask
        }
    }
}

/// Build a [`Position`] from a sequence of 1-based column digits ("4453").
/// Fails unless every move in the sequence can be played.
impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut position = Self::new();
        let played = position.play_sequence(s);

        if played != s.chars().count() {
            return Err(ParsePositionError { index: played });
        }
        Ok(position)
    }
}

/// Draw the board with the first player's stones as `X`, top row first.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let first = self.first_player_stones();
        let cells = (0..HEIGHT).rev().flat_map(|row| {
            (0..WIDTH).map(move |col| {
                let cell = bitboard::bottom_mask_col(col) << row;
                match (self.mask & cell != 0, first & cell != 0) {
                    (false, _) => '.',
                    (true, true) => 'X',
                    (true, false) => 'O',
                }
            })
        });
        utils::format_grid(cells, f)
    }
}
