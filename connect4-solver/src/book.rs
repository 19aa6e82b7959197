//! The opening book: exact scores of shallow positions, persisted to disk.
//!
//! File format, all fields single bytes unless noted:
//!
//! | offset | field                                                   |
//! |--------|---------------------------------------------------------|
//! | 0      | board width                                             |
//! | 1      | board height                                            |
//! | 2      | maximum depth (move count) of stored positions          |
//! | 3      | key size in bytes: 1, 2 or 4                            |
//! | 4      | value size in bytes: always 1                           |
//! | 5      | `log_size`: smallest prime above `2^log_size` slots     |
//! | 6      | keys, little-endian, `key size` bytes each              |
//! | ...    | values, one byte each                                   |

use crate::bound;
use crate::table::{self, ScoreTable};
use byteorder::{ReadBytesExt, WriteBytesExt};
use connect4::{Position, HEIGHT, WIDTH};
use derive_more::{Display, Error};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Largest `log_size` accepted in a book header.
const MAX_LOG_SIZE: u8 = 40;

/// Largest key size accepted in a book header, before checking it is implemented.
const MAX_KEY_BYTES: u8 = 8;

/// Why an opening book could not be loaded.
#[derive(Debug, Display, Error)]
pub enum BookError {
    #[display(fmt = "cannot read opening book: {}", source)]
    Io { source: io::Error },
    #[display(fmt = "invalid width (found: {}, expected: {})", found, expected)]
    InvalidWidth { found: u8, expected: u8 },
    #[display(fmt = "invalid height (found: {}, expected: {})", found, expected)]
    InvalidHeight { found: u8, expected: u8 },
    #[display(fmt = "invalid depth (found: {})", found)]
    InvalidDepth { found: u8 },
    #[display(fmt = "invalid key size (found: {} bytes)", found)]
    InvalidKeySize { found: u8 },
    #[display(fmt = "invalid value size (found: {}, expected: 1)", found)]
    InvalidValueSize { found: u8 },
    #[display(fmt = "invalid log2(size) (found: {})", found)]
    InvalidLogSize { found: u8 },
    #[display(fmt = "unimplemented opening book size: {}", found)]
    UnsupportedLogSize { found: u8 },
}

impl From<io::Error> for BookError {
    fn from(source: io::Error) -> Self {
        BookError::Io { source }
    }
}

/// A depth-limited table of exact scores, keyed by [`Position::key3`].
///
/// The book only answers for positions with at most [`OpeningBook::depth`]
/// moves. It never holds a table without a valid depth: a failed load leaves
/// it empty.
pub struct OpeningBook {
    table: Option<Box<dyn ScoreTable>>,
    width: u8,
    height: u8,
    depth: Option<u8>,
}

impl Default for OpeningBook {
    /// An empty book for the standard board.
    fn default() -> Self {
        Self::new(WIDTH as u8, HEIGHT as u8)
    }
}

impl OpeningBook {
    /// An empty book for a board of the given size.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            table: None,
            width,
            height,
            depth: None,
        }
    }

    /// A book answering from `table` for positions up to `depth` moves.
    pub fn from_table(width: u8, height: u8, depth: u8, table: Box<dyn ScoreTable>) -> Self {
        Self {
            table: Some(table),
            width,
            height,
            depth: Some(depth),
        }
    }

    /// Deepest move count the book answers for, or `None` if nothing is loaded.
    pub fn depth(&self) -> Option<u8> {
        self.depth
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some() && self.depth.is_some()
    }

    /// Empty the book's entries, keeping its table allocated.
    pub fn clear(&mut self) {
        if let Some(table) = self.table.as_mut() {
            table.reset();
        }
    }

    /// The encoded score stored for `position`, or 0 if the book has none.
    /// Decode with [`bound::decode_exact`].
    pub fn get(&self, position: Position) -> u8 {
        match (&self.table, self.depth) {
            (Some(table), Some(depth)) if position.moves() <= depth as usize => {
                table.get(position.key3())
            }
            _ => 0,
        }
    }

    /// Store the exact score of `position`. Does nothing without a table.
    pub fn insert(&mut self, position: Position, score: i32) {
        if let Some(table) = self.table.as_mut() {
            table.put(position.key3(), bound::encode_exact(score));
        }
    }

    /// Replace the book's contents with the book file at `path`.
    ///
    /// On failure the error is logged and returned, and the book is left empty.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BookError> {
        let path = path.as_ref();
        self.table = None;
        self.depth = None;

        let file = File::open(path).map_err(|e| {
            warn!("Unable to load opening book {}: {}", path.display(), e);
            BookError::from(e)
        })?;
        self.load_from(BufReader::new(file))?;

        info!(
            "Loaded opening book {} (depth: {:?})",
            path.display(),
            self.depth
        );
        Ok(())
    }

    /// Replace the book's contents with a book read from `reader`.
    ///
    /// On failure the error is logged and returned, and the book is left empty.
    pub fn load_from<R: Read>(&mut self, mut reader: R) -> Result<(), BookError> {
        self.table = None;
        self.depth = None;

        match self.read_book(&mut reader) {
            Ok((table, depth)) => {
                self.table = Some(table);
                self.depth = Some(depth);
                Ok(())
            }
            Err(e) => {
                warn!("Unable to load opening book: {}", e);
                Err(e)
            }
        }
    }

    /// Validate the header field by field, then read the table it describes.
    fn read_book(&self, reader: &mut dyn Read) -> Result<(Box<dyn ScoreTable>, u8), BookError> {
        let width = reader.read_u8()?;
        if width != self.width {
            return Err(BookError::InvalidWidth {
                found: width,
                expected: self.width,
            });
        }

        let height = reader.read_u8()?;
        if height != self.height {
            return Err(BookError::InvalidHeight {
                found: height,
                expected: self.height,
            });
        }

        let depth = reader.read_u8()?;
        if depth as usize > self.width as usize * self.height as usize {
            return Err(BookError::InvalidDepth { found: depth });
        }

        let key_bytes = reader.read_u8()?;
        if key_bytes > MAX_KEY_BYTES {
            return Err(BookError::InvalidKeySize { found: key_bytes });
        }

        let value_bytes = reader.read_u8()?;
        if value_bytes != 1 {
            return Err(BookError::InvalidValueSize { found: value_bytes });
        }

        let log_size = reader.read_u8()?;
        if log_size > MAX_LOG_SIZE {
            return Err(BookError::InvalidLogSize { found: log_size });
        }

        let mut table = table::new_table(key_bytes, log_size)?;
        table.read_from(reader)?;
        Ok((table, depth))
    }

    /// Write the book to `path`. Does nothing if no table is loaded.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BookError> {
        if !self.is_loaded() {
            return Ok(());
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the book in file format. Does nothing if no table is loaded.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), BookError> {
        if let (Some(table), Some(depth)) = (&self.table, self.depth) {
            writer.write_u8(self.width)?;
            writer.write_u8(self.height)?;
            writer.write_u8(depth)?;
            writer.write_u8(table.key_bytes() as u8)?;
            writer.write_u8(table.value_bytes() as u8)?;
            writer.write_u8(table.log_size())?;
            table.write_to(&mut writer)?;
        }
        Ok(())
    }
}
