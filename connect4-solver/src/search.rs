//! The search engine: negamax with alpha-beta pruning, a transposition table
//! of score bounds, and an opening book.

use crate::book::{BookError, OpeningBook};
use crate::bound::{self, Bound};
use crate::config::SolverConfig;
use crate::sorter::{MoveChooser, MoveSorter};
use crate::table::{ScoreTable, TranspositionTable};
use connect4::bitboard::{self, Bitboard};
use connect4::{Position, NUM_CELLS, WIDTH};
use log::{debug, info};
use std::path::Path;

/// Solves Connect Four positions. Keeps its transposition table between
/// searches, so solving related positions gets faster over time.
pub struct Solver {
    table: TranspositionTable<u32>,
    book: OpeningBook,
    /// Columns from the center outwards, the order moves are tried in.
    column_order: [usize; WIDTH],
    node_count: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// Score of a position where the side to move wins with its next stone.
#[inline]
fn win_next_score(position: Position) -> i32 {
    ((NUM_CELLS + 1 - position.moves()) / 2) as i32
}

/// Center-out column order, e.g. `[3, 2, 4, 1, 5, 0, 6]` for 7 columns.
fn center_out_order() -> [usize; WIDTH] {
    let mut order = [0; WIDTH];
    for (i, col) in order.iter_mut().enumerate() {
        let i = i as isize;
        let offset = (1 - 2 * (i % 2)) * (i + 1) / 2;
        *col = (WIDTH as isize / 2 + offset) as usize;
    }
    order
}

impl Solver {
    /// A solver with the default table size and no opening book.
    pub fn new() -> Self {
        Self::with_config(&SolverConfig::default())
    }

    /// A solver sized by `config`. A book that fails to load is logged and
    /// skipped; the solver then searches without it.
    pub fn with_config(config: &SolverConfig) -> Self {
        let mut solver = Self {
            table: TranspositionTable::new(config.clamped_log_size()),
            book: OpeningBook::default(),
            column_order: center_out_order(),
            node_count: 0,
        };
        if let Some(path) = &config.book {
            solver.load_book(path).ok();
        }
        solver
    }

    /// Replace the opening book with the book file at `path`.
    pub fn load_book<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BookError> {
        self.book.load(path)
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OpeningBook {
        &mut self.book
    }

    /// Number of nodes explored since the last reset.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn reset_node_count(&mut self) {
        self.node_count = 0;
    }

    /// Forget every stored bound and reset the node counter.
    pub fn reset(&mut self) {
        self.table.reset();
        self.node_count = 0;
    }

    /// Fill a sorter with `moves`, in center-out order, best heuristic first.
    fn sorted_moves(&self, position: Position, moves: Bitboard) -> MoveSorter {
        let mut sorter = MoveSorter::new();
        for &col in self.column_order.iter().rev() {
            let mv = moves & Position::column_mask(col);
            if mv != 0 {
                sorter.add(mv, position.move_score(mv));
            }
        }
        sorter
    }

    /// Recursively score a position with negamax alpha-beta.
    ///
    /// Requires `alpha < beta`, and that nobody has won yet and the side to
    /// move cannot win with its next stone. With `s` the true score:
    ///  - if `s <= alpha`, returns some value `v` with `s <= v <= alpha`;
    ///  - if `s >= beta`, returns some value `v` with `beta <= v <= s`;
    ///  - otherwise returns `s`.
    ///
    /// `depth` limits the number of plies searched (`None` for unbounded).
    /// Nodes at the depth limit score 0, which is only exact for draws.
    pub fn negamax(
        &mut self,
        position: Position,
        mut alpha: i32,
        mut beta: i32,
        depth: Option<u32>,
    ) -> i32 {
        debug_assert!(alpha < beta);
        debug_assert!(!position.can_win_next());

        self.node_count += 1;

        // If every move lets the opponent win, they win with their next stone.
        let possible = position.possible_non_losing_moves();
        if possible == 0 {
            return -((NUM_CELLS - position.moves()) as i32) / 2;
        }

        // Nobody can complete an alignment in the last two stones.
        if position.moves() >= NUM_CELLS - 2 {
            return 0;
        }

        // The opponent cannot win with their next stone.
        let min = -((NUM_CELLS - 2 - position.moves()) as i32) / 2;
        if alpha < min {
            alpha = min;
            if alpha >= beta {
                return alpha;
            }
        }

        // We cannot win with our next stone.
        let max = ((NUM_CELLS - 1 - position.moves()) / 2) as i32;
        if beta > max {
            beta = max;
            if alpha >= beta {
                return beta;
            }
        }

        let key = position.key();
        match Bound::decode(self.table.get(key)) {
            Some(Bound::Lower(min)) if alpha < min => {
                alpha = min;
                if alpha >= beta {
                    return alpha;
                }
            }
            Some(Bound::Upper(max)) if beta > max => {
                beta = max;
                if alpha >= beta {
                    return beta;
                }
            }
            _ => {}
        }

        if let Some(score) = bound::decode_exact(self.book.get(position)) {
            return score;
        }

        let depth = match depth {
            Some(0) => return 0,
            Some(d) => Some(d - 1),
            None => None,
        };

        for mv in self.sorted_moves(position, possible) {
            // Search the opponent's reply within [-beta, -alpha]: we need no
            // precision above beta, nor below the best score found so far.
            let score = -self.negamax(position.play(mv), -beta, -alpha, depth);

            // Fail high: the opponent will not allow this line.
            if score >= beta {
                self.table.put(key, Bound::Lower(score).encode());
                return score;
            }

            if score > alpha {
                alpha = score;
            }
        }

        self.table.put(key, Bound::Upper(alpha).encode());
        alpha
    }

    /// Compute the score of a position.
    ///
    /// With `weak`, only the outcome is computed: 1 for a win, 0 for a draw
    /// and -1 for a loss. Otherwise the score tells how fast the game ends.
    pub fn solve(&mut self, position: Position, depth: Option<u32>, weak: bool) -> i32 {
        // Negamax does not handle immediate wins.
        if position.can_win_next() {
            return if weak { 1 } else { win_next_score(position) };
        }

        let (mut min, mut max) = if weak {
            (-1, 1)
        } else {
            (
                -((NUM_CELLS - position.moves()) as i32) / 2,
                win_next_score(position),
            )
        };

        // Binary search over the score with null windows, trying the half
        // closer to zero first.
        while min < max {
            let mut med = min + (max - min) / 2;
            if med <= 0 && min / 2 < med {
                med = min / 2;
            } else if med >= 0 && max / 2 > med {
                med = max / 2;
            }

            let r = self.negamax(position, med, med + 1, depth);
            if r <= med {
                max = r;
            } else {
                min = r;
            }
        }

        if weak {
            min.signum()
        } else {
            min
        }
    }

    /// Find the best column to play, or `None` if the board is full.
    pub fn best_move(&mut self, position: Position, depth: Option<u32>, weak: bool) -> Option<usize> {
        let possible = position.possible();
        if possible == 0 {
            return None;
        }

        let mut chooser = MoveChooser::new();
        for mv in self.sorted_moves(position, possible) {
            let col = bitboard::column_of(mv);
            let score = match (position.is_winning_move(col), weak) {
                (true, true) => 1,
                (true, false) => win_next_score(position),
                (false, _) => -self.solve(position.play(mv), depth, weak),
            };
            debug!("next: {}  score: {}", col, score);
            chooser.add(mv, score);
        }

        let best = chooser.best_move().map(bitboard::column_of);
        if let (Some(col), Some(score)) = (best, chooser.best_score()) {
            info!("best: {}  score: {}", col, score);
        }
        best
    }

    /// Score every column: `None` for a full column, otherwise the score of
    /// the position after playing it, from the current player's side.
    pub fn analyze(
        &mut self,
        position: Position,
        depth: Option<u32>,
        weak: bool,
    ) -> [Option<i32>; WIDTH] {
        let mut scores = [None; WIDTH];
        for (col, score) in scores.iter_mut().enumerate() {
            if !position.can_play(col) {
                continue;
            }
            *score = Some(if position.is_winning_move(col) {
                if weak {
                    1
                } else {
                    win_next_score(position)
                }
            } else {
                -self.solve(position.play_col(col), depth, weak)
            });
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn small_solver() -> Solver {
        Solver::with_config(&SolverConfig {
            table_log_size: 18,
            book: None,
        })
    }

    #[test]
    fn column_order_is_center_out() {
        assert_eq!(center_out_order(), [3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn immediate_win_skips_search() {
        let mut solver = small_solver();
        let position = Position::from_str("121212").unwrap();
        assert_eq!(solver.solve(position, None, false), (NUM_CELLS as i32 + 1 - 6) / 2);
        assert_eq!(solver.solve(position, None, true), 1);
        assert_eq!(solver.node_count(), 0);
    }

    #[test]
    fn forced_loss_scores_fastest_loss() {
        let mut solver = small_solver();
        // The first player has an open three on the bottom row.
        let position = Position::from_str("2636").unwrap().play_col(3);
        let expected = -((NUM_CELLS - position.moves()) as i32) / 2;
        assert_eq!(solver.negamax(position, -30, 30, None), expected);
        assert_eq!(solver.solve(position, None, false), expected);
        assert_eq!(solver.solve(position, None, true), -1);
    }

    #[test]
    fn depth_limit_returns_zero() {
        let mut solver = small_solver();
        let position = Position::from_str("44").unwrap();
        assert_eq!(solver.negamax(position, -1, 1, Some(0)), 0);
    }

    #[test]
    fn window_collapse_short_circuits() {
        let mut solver = small_solver();
        let position = Position::from_str("44").unwrap();
        // No score above (42 - 1 - 2) / 2 is reachable.
        assert_eq!(solver.negamax(position, 19, 21, None), 19);
        assert_eq!(solver.node_count(), 1);
    }

    #[test]
    fn book_answers_before_search() {
        let mut solver = small_solver();
        let table = crate::table::new_table(4, 14).unwrap();
        *solver.book_mut() = OpeningBook::from_table(7, 6, 4, table);

        let position = Position::from_str("4").unwrap();
        solver.book_mut().insert(position, 7);
        assert_eq!(solver.negamax(position, -10, 10, None), 7);
        assert_eq!(solver.node_count(), 1);
    }

    #[test]
    fn analyze_respects_depth_limit() {
        let mut solver = small_solver();
        let position = Position::from_str("44").unwrap();
        assert_eq!(solver.analyze(position, Some(0), false), [Some(0); WIDTH]);
    }

    #[test]
    fn reset_clears_table_and_counter() {
        let mut solver = small_solver();
        let position = Position::from_str("2252576253462244111563365343671351441").unwrap();
        assert_eq!(solver.solve(position, None, false), -1);
        assert!(solver.node_count() > 0);
        solver.reset();
        assert_eq!(solver.node_count(), 0);
        assert_eq!(solver.solve(position, None, false), -1);
    }

    #[test]
    fn best_move_matches_analysis() {
        let mut solver = small_solver();
        let position = Position::from_str("2252576253462244111563365343671351441").unwrap();
        let scores = solver.analyze(position, None, false);
        let col = solver.best_move(position, None, false).unwrap();
        assert_eq!(scores[col], scores.iter().flatten().max().copied());
    }

    #[test]
    fn analyze_marks_full_columns() {
        let mut solver = small_solver();
        let position = Position::from_str("2252576253462244111563365343671351441").unwrap();
        let scores = solver.analyze(position, None, false);
        for (col, score) in scores.iter().enumerate() {
            assert_eq!(score.is_some(), position.can_play(col));
        }
        let best = scores.iter().flatten().max().copied();
        assert_eq!(best, Some(-1));
    }
}
