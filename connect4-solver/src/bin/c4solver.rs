//! Reads move sequences from stdin, one per line, and prints their scores.
//!
//! Each output line is `<sequence> <score(s)> <nodes> <micros>`.

use anyhow::{Context, Result};
use clap::Parser;
use connect4::Position;
use connect4_solver::{Solver, SolverConfig};
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Printed by `--analyze` for a column which cannot be played.
const INVALID_MOVE: i32 = -1000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opening book to load
    #[arg(short, long)]
    book: Option<PathBuf>,

    /// Only compute win, draw or loss
    #[arg(short, long)]
    weak: bool,

    /// Print the score of every column instead of the position's score
    #[arg(short, long, conflicts_with = "best_move")]
    analyze: bool,

    /// Print the best column to play instead of the position's score
    #[arg(long)]
    best_move: bool,

    /// Stop searching after this many plies
    #[arg(short, long)]
    depth: Option<u32>,

    /// The transposition table holds about 2^N entries
    #[arg(long, default_value_t = 23)]
    table_log_size: u8,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = SolverConfig {
        table_log_size: args.table_log_size,
        book: args.book.clone(),
    };
    let mut solver = Solver::with_config(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_number, line) in stdin.lock().lines().enumerate() {
        let line = line.context("cannot read from stdin")?;
        let sequence = line.trim();

        let position: Position = match sequence.parse() {
            Ok(position) => position,
            Err(e) => {
                eprintln!("Line {}: {} \"{}\"", line_number + 1, e, sequence);
                continue;
            }
        };

        solver.reset_node_count();
        let start = Instant::now();
        let result = if args.analyze {
            solver
                .analyze(position, args.depth, args.weak)
                .iter()
                .map(|score| score.unwrap_or(INVALID_MOVE))
                .join(" ")
        } else if args.best_move {
            match solver.best_move(position, args.depth, args.weak) {
                Some(col) => (col + 1).to_string(),
                None => "-".to_string(),
            }
        } else {
            solver.solve(position, args.depth, args.weak).to_string()
        };
        let micros = start.elapsed().as_micros();

        writeln!(
            out,
            "{} {} {} {}",
            sequence,
            result,
            solver.node_count(),
            micros
        )
        .context("cannot write to stdout")?;
    }

    Ok(())
}
