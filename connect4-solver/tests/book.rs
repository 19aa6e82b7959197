use connect4::Position;
use connect4_solver::bound;
use connect4_solver::table::new_table;
use connect4_solver::{BookError, OpeningBook, Solver, SolverConfig};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("connect4-{}-{}.book", name, std::process::id()))
}

fn book_with(entries: &[(&str, i32)]) -> OpeningBook {
    let mut book = OpeningBook::from_table(7, 6, 4, new_table(4, 14).unwrap());
    for &(sequence, score) in entries {
        book.insert(Position::from_str(sequence).unwrap(), score);
    }
    book
}

#[test]
fn save_then_load() {
    let path = temp_path("save");
    let book = book_with(&[("4", 1), ("44", -2), ("4455", 3)]);
    book.save(&path).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 6 + 16411 * 5);

    let mut loaded = OpeningBook::default();
    loaded.load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded.depth(), Some(4));
    for (sequence, score) in [("4", 1), ("44", -2), ("4455", 3)] {
        let position = Position::from_str(sequence).unwrap();
        assert_eq!(bound::decode_exact(loaded.get(position)), Some(score));
    }
    assert_eq!(loaded.get(Position::from_str("45").unwrap()), 0);
}

#[test]
fn missing_file() {
    let mut book = book_with(&[("4", 1)]);
    let err = book.load(temp_path("missing")).unwrap_err();
    assert!(matches!(err, BookError::Io { .. }));
    assert!(!book.is_loaded());
}

#[test]
fn wrong_board_size() {
    let path = temp_path("width");
    let mut bytes = vec![8, 6, 4, 4, 1, 14];
    bytes.resize(6 + 16411 * 5, 0);
    fs::write(&path, &bytes).unwrap();

    let mut book = OpeningBook::default();
    let err = book.load(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, BookError::InvalidWidth { found: 8, expected: 7 }));
}

#[test]
fn truncated_file() {
    let path = temp_path("truncated");
    let book = book_with(&[("4", 1)]);
    book.save(&path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();

    let mut loaded = OpeningBook::default();
    let err = loaded.load(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert!(matches!(err, BookError::Io { .. }));
    assert_eq!(loaded.depth(), None);
}

#[test]
fn solver_loads_book_from_config() {
    let path = temp_path("solver");
    // Not the true score: shows the solver trusts the book.
    book_with(&[("4", 7)]).save(&path).unwrap();

    let mut solver = Solver::with_config(&SolverConfig {
        table_log_size: 18,
        book: Some(path.clone()),
    });
    fs::remove_file(&path).unwrap();

    assert!(solver.book().is_loaded());
    let position = Position::from_str("4").unwrap();
    assert_eq!(solver.negamax(position, -21, 21, None), 7);
    assert_eq!(solver.node_count(), 1);
}

#[test]
fn solver_without_book() {
    let mut solver = Solver::with_config(&SolverConfig {
        table_log_size: 18,
        book: Some(temp_path("absent")),
    });
    assert!(!solver.book().is_loaded());

    let position = Position::from_str("2252576253462244111563365343671351441").unwrap();
    assert_eq!(solver.solve(position, None, false), -1);
}
