use criterion::*;

use connect4::Position;
use connect4_solver::{solve_exact, solve_win_loss_draw, Solver, SolverConfig};

const POSITIONS: [&str; 3] = [
    "2252576253462244111563365343671351441",
    "7422341735647741166133573473242566",
    "23163416124767223154467471272416755633",
];

fn criterion_solve(c: &mut Criterion) {
    let positions: Vec<Position> = POSITIONS.iter().map(|s| s.parse().unwrap()).collect();
    let config = SolverConfig {
        table_log_size: 20,
        book: None,
    };

    let mut group = c.benchmark_group("solve");
    for (i, &position) in positions.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("exact", i), &position, |b, &position| {
            let mut solver = Solver::with_config(&config);
            b.iter(|| {
                solver.reset();
                solve_exact(&mut solver, black_box(position))
            })
        });
        group.bench_with_input(BenchmarkId::new("wld", i), &position, |b, &position| {
            let mut solver = Solver::with_config(&config);
            b.iter(|| {
                solver.reset();
                solve_win_loss_draw(&mut solver, black_box(position))
            })
        });
    }
    group.finish();
}

criterion_group!(solve, criterion_solve);
criterion_main!(solve);
