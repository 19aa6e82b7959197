//! Low-level bitboard operations.
//!
//! For efficiency, these operations are unchecked and give meaningless results
//! if passed a board that cannot arise in a real game.
//!
//! Under the hood, a board is a u64. Bit `col * (HEIGHT + 1) + row` holds the
//! cell in column `col` and row `row`, with row 0 at the bottom. The bit above
//! the top row of every column is a sentinel which is never set, so shifting a
//! column's stones up or down cannot bleed into the next column.

use crate::{HEIGHT, WIDTH};

/// Holds a single bit per cell on a Connect Four board.
pub type Bitboard = u64;

/// Distance between two horizontally adjacent cells.
const STRIDE: usize = HEIGHT + 1;

const fn bottom(width: usize) -> Bitboard {
    if width == 0 {
        0
    } else {
        bottom(width - 1) | 1 << ((width - 1) * STRIDE)
    }
}

/// The bottom cell of every column.
pub const BOTTOM_MASK: Bitboard = bottom(WIDTH);

/// Every playable cell on the board.
pub const BOARD_MASK: Bitboard = BOTTOM_MASK * ((1 << HEIGHT) - 1);

/// The top cell of a column.
#[inline]
pub const fn top_mask_col(col: usize) -> Bitboard {
    1 << (HEIGHT - 1 + col * STRIDE)
}

/// The bottom cell of a column.
#[inline]
pub const fn bottom_mask_col(col: usize) -> Bitboard {
    1 << (col * STRIDE)
}

/// Every cell of a column.
#[inline]
pub const fn column_mask(col: usize) -> Bitboard {
    ((1 << HEIGHT) - 1) << (col * STRIDE)
}

/// The column holding the lowest set bit of `bitboard`.
/// Undefined for an empty bitboard.
#[inline]
pub fn column_of(bitboard: Bitboard) -> usize {
    bitboard.trailing_zeros() as usize / STRIDE
}

/// Compute the empty cells which would complete an alignment of four for the
/// player owning `position`, given the `mask` of all occupied cells.
#[inline]
pub fn compute_winning_position(position: Bitboard, mask: Bitboard) -> Bitboard {
    // Vertical: only three stones directly below can complete a column.
    let mut r = (position << 1) & (position << 2) & (position << 3);

    // Horizontal, then both diagonals: for each direction, a hole may sit at
    // either end of three stones or inside the line with two on one side.
    for shift in [STRIDE, HEIGHT, STRIDE + 1] {
        let p = (position << shift) & (position << (2 * shift));
        r |= p & (position << (3 * shift));
        r |= p & (position >> shift);

        let p = (position >> shift) & (position >> (2 * shift));
        r |= p & (position << shift);
        r |= p & (position >> (3 * shift));
    }

    r & (BOARD_MASK ^ mask)
}
