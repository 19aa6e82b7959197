//! Utilities for loading solver benchmark suites: text files with one
//! position per line, written as `<move sequence> <expected score>`.

use crate::Position;
use derive_more::{Display, Error};
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

/// A single benchmark position with its known score.
#[derive(Clone, Debug)]
pub struct SuitePosition {
    pub sequence: String,
    pub position: Position,
    pub score: i32,
}

#[derive(Debug, PartialEq, Error, Display)]
pub enum LoadSuiteError {
    MissingSequence,
    CannotParsePosition,
    CannotParseScore,
    CannotReadFile,
}

/// Load all of the [`SuitePosition`]s in the file at `path`.
pub fn load_suite_positions<P: AsRef<Path>>(path: P) -> Result<Vec<SuitePosition>, LoadSuiteError> {
    let file = File::open(path).or(Err(LoadSuiteError::CannotReadFile))?;
    let reader = io::BufReader::new(file);

    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.or(Err(LoadSuiteError::CannotReadFile))?.parse())
        .collect()
}

impl std::str::FromStr for SuitePosition {
    type Err = LoadSuiteError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut sections = line.split_whitespace();

        let sequence = sections.next().ok_or(LoadSuiteError::MissingSequence)?;
        let position: Position = sequence
            .parse()
            .or(Err(LoadSuiteError::CannotParsePosition))?;
        let score = sections
            .next()
            .ok_or(LoadSuiteError::CannotParseScore)?
            .parse()
            .or(Err(LoadSuiteError::CannotParseScore))?;

        Ok(SuitePosition {
            sequence: sequence.to_string(),
            position,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_suite_line() {
        let parsed: SuitePosition = "2252576253462244111563365343671351441 -1".parse().unwrap();
        assert_eq!(parsed.sequence.len(), 37);
        assert_eq!(parsed.position.moves(), 37);
        assert_eq!(parsed.score, -1);
    }

    #[test]
    fn parse_suite_line_errors() {
        assert_eq!("".parse::<SuitePosition>().unwrap_err(), LoadSuiteError::MissingSequence);
        assert_eq!(
            "4480 3".parse::<SuitePosition>().unwrap_err(),
            LoadSuiteError::CannotParsePosition
        );
        assert_eq!("44".parse::<SuitePosition>().unwrap_err(), LoadSuiteError::CannotParseScore);
        assert_eq!(
            "44 x".parse::<SuitePosition>().unwrap_err(),
            LoadSuiteError::CannotParseScore
        );
    }
}
