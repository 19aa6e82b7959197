//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for checking and tuning move generation.

use crate::{Position, WIDTH};

pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Position::new(), depth)
}

fn leaves_below(position: Position, depth: u64) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    (0..WIDTH)
        .filter(|&col| position.can_play(col))
        .map(|col| {
            // A winning stone ends the game: count it as a leaf.
            if position.is_winning_move(col) {
                1
            } else {
                leaves_below(position.play_col(col), depth - 1)
            }
        })
        .sum()
}
