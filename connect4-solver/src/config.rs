//! Solver configuration.

use std::path::PathBuf;

/// Smallest transposition table for which a 32-bit partial key still
/// identifies a position uniquely within its slot.
pub const MIN_TABLE_LOG_SIZE: u8 = 17;

/// Largest transposition table the solver will allocate.
pub const MAX_TABLE_LOG_SIZE: u8 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// The transposition table holds the smallest prime above `2^table_log_size` entries.
    /// Clamped to `MIN_TABLE_LOG_SIZE..=MAX_TABLE_LOG_SIZE`.
    pub table_log_size: u8,
    /// Opening book to load at construction.
    pub book: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            table_log_size: 23,
            book: None,
        }
    }
}

impl SolverConfig {
    pub(crate) fn clamped_log_size(&self) -> u8 {
        self.table_log_size
            .clamp(MIN_TABLE_LOG_SIZE, MAX_TABLE_LOG_SIZE)
    }
}
