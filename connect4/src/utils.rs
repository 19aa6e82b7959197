//! Miscellaneous project utilities.

use crate::{HEIGHT, WIDTH};
use std::fmt::{self, Formatter};
use std::iter::Iterator;

/// Format one character per cell into a grid under 1-based column numbers.
/// `cells` must yield exactly `WIDTH * HEIGHT` items, top row first.
pub fn format_grid<T: Iterator<Item = char>>(mut cells: T, f: &mut Formatter) -> fmt::Result {
    for col in 1..=WIDTH {
        write!(f, " {}", col)?;
    }

    for _ in 0..HEIGHT {
        writeln!(f)?;
        for _ in 0..WIDTH {
            write!(f, " {}", cells.next().ok_or(fmt::Error)?)?;
        }
    }

    match cells.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
