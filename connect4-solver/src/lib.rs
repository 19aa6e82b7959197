//! `connect4-solver` computes the exact game-theoretic value of Connect Four positions.
//!
//! The search is a negamax with alpha-beta pruning, a lossy transposition
//! table of score bounds, and an optional opening book of precomputed exact
//! scores. [`Solver::solve`] narrows the score with null-window searches
//! instead of running a single full-window search.

pub mod book;
pub mod bound;
pub mod config;
pub mod search;
pub mod sorter;
pub mod table;

pub use book::{BookError, OpeningBook};
pub use bound::Bound;
pub use config::SolverConfig;
pub use search::Solver;

/// Solve a position, trying to determine the exact score.
/// Takes longer, but tells how fast the game is won or lost.
pub fn solve_exact(solver: &mut Solver, position: connect4::Position) -> i32 {
    solver.solve(position, None, false)
}

/// Solve a position, caring only about a win, loss, or draw.
/// Faster, but provides less information.
pub fn solve_win_loss_draw(solver: &mut Solver, position: connect4::Position) -> i32 {
    solver.solve(position, None, true)
}
