//! Tests on benchmark suites of `<move sequence> <score>` lines.
//!
//! Set `C4_SUITE` to the suite file, e.g. `C4_SUITE=Test_L3_R1 cargo test -- --ignored`.

use connect4::test_utils::suite;
use connect4_solver::{solve_exact, solve_win_loss_draw, Solver};
use indicatif::ProgressIterator;
use std::env;

fn suite_path() -> String {
    env::var("C4_SUITE").expect("C4_SUITE must name a suite file")
}

#[test]
#[ignore]
fn suite_exact() {
    let mut solver = Solver::new();
    for position in suite::load_suite_positions(suite_path()).unwrap().iter().progress() {
        let score = solve_exact(&mut solver, position.position);
        assert_eq!(score, position.score, "{}", position.sequence);
    }
}

#[test]
#[ignore]
fn suite_win_loss_draw() {
    let mut solver = Solver::new();
    for position in suite::load_suite_positions(suite_path()).unwrap().iter().progress() {
        let score = solve_win_loss_draw(&mut solver, position.position);
        assert_eq!(score, position.score.signum(), "{}", position.sequence);
    }
}
