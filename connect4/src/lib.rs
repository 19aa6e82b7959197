//! `connect4` is a small, fast Connect Four library for solvers and UIs.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations on packed `u64` boards.
//!    These are fast, but assume their inputs describe a reachable board.
//!  - [`Position`] implements the game logic a solver needs on top of them:
//!    move generation, win detection, keys for hashing, and move heuristics.

pub mod bitboard;
pub mod test_utils;

mod position;
mod utils;

pub use position::*;

/// The number of columns on a Connect Four board.
pub const WIDTH: usize = 7;

/// The number of rows on a Connect Four board.
pub const HEIGHT: usize = 6;

/// The number of cells on a Connect Four board.
pub const NUM_CELLS: usize = WIDTH * HEIGHT;

/// Score of the fastest possible loss.
pub const MIN_SCORE: i32 = -(NUM_CELLS as i32) / 2;

/// Score of the fastest possible win.
pub const MAX_SCORE: i32 = (NUM_CELLS as i32 + 1) / 2;

// Every column needs one sentinel bit above its top row.
const _: () = assert!(WIDTH * (HEIGHT + 1) <= 64);
