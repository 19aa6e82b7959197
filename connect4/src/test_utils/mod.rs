//! Utilities used for testing and benchmarking.

pub mod suite;

mod perft;
pub use perft::run_perft;
