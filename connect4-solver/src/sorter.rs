//! Move ordering containers for the search.

use arrayvec::ArrayVec;
use connect4::bitboard::Bitboard;
use connect4::WIDTH;

#[derive(Clone, Copy, Debug)]
struct Entry {
    mv: Bitboard,
    score: i32,
}

/// Orders the children of a search node, best heuristic score first.
///
/// Holds at most one move per column. Among equal scores, the move added last
/// comes out first, so callers add their preferred moves last.
#[derive(Clone, Debug, Default)]
pub struct MoveSorter {
    // Sorted by increasing score; iteration pops from the back.
    entries: ArrayVec<Entry, WIDTH>,
}

impl MoveSorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a move, keeping entries sorted.
    pub fn add(&mut self, mv: Bitboard, score: i32) {
        let entry = Entry { mv, score };
        let pos = self
            .entries
            .iter()
            .rposition(|e| e.score <= score)
            .map_or(0, |i| i + 1);
        self.entries.insert(pos, entry);
    }
}

impl Iterator for MoveSorter {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        self.entries.pop().map(|e| e.mv)
    }
}

/// Ranks fully searched root moves, keeping the best one.
/// The first move added wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveChooser {
    best: Option<(Bitboard, i32)>,
}

impl MoveChooser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mv: Bitboard, score: i32) {
        match self.best {
            Some((_, best_score)) if best_score >= score => {}
            _ => self.best = Some((mv, score)),
        }
    }

    pub fn best_move(&self) -> Option<Bitboard> {
        self.best.map(|(mv, _)| mv)
    }

    pub fn best_score(&self) -> Option<i32> {
        self.best.map(|(_, score)| score)
    }
}
