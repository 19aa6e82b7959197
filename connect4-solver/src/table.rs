//! Fixed-capacity score tables: the solver's transposition table and the
//! storage behind the opening book.
//!
//! A table has a prime number of slots and stores, for each slot, the low bits
//! of the last key written there and a one-byte value. Writes always replace.
//! With `len` prime and `K` holding `k` bits, two keys sharing a slot and a
//! partial key differ by a multiple of `len * 2^k`; when that exceeds the key
//! range, the partial key identifies the position exactly.

use crate::book::BookError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Table sizes the opening book format can describe, as `log2` of the slot count.
pub const SUPPORTED_LOG_SIZES: [u8; 8] = [14, 21, 22, 23, 24, 25, 26, 27];

/// An unsigned integer holding the low bits of a table key.
pub trait PartialKey: Copy + Default + Eq {
    /// Size of the stored key in bytes.
    const BYTES: usize;

    /// Keep the low bits of `key`.
    fn truncate(key: u64) -> Self;

    /// Fill `keys` from little-endian bytes.
    fn read_keys(reader: &mut dyn Read, keys: &mut [Self]) -> io::Result<()>;

    /// Write `keys` as little-endian bytes.
    fn write_keys(writer: &mut dyn Write, keys: &[Self]) -> io::Result<()>;
}

impl PartialKey for u8 {
    const BYTES: usize = 1;

    #[inline]
    fn truncate(key: u64) -> Self {
        key as u8
    }

    fn read_keys(reader: &mut dyn Read, keys: &mut [Self]) -> io::Result<()> {
        reader.read_exact(keys)
    }

    fn write_keys(writer: &mut dyn Write, keys: &[Self]) -> io::Result<()> {
        writer.write_all(keys)
    }
}

macro_rules! impl_partial_key {
    ($ty:ty, $read_into:ident, $write:ident) => {
        impl PartialKey for $ty {
            const BYTES: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn truncate(key: u64) -> Self {
                key as $ty
            }

            fn read_keys(reader: &mut dyn Read, keys: &mut [Self]) -> io::Result<()> {
                reader.$read_into::<LittleEndian>(keys)
            }

            fn write_keys(writer: &mut dyn Write, keys: &[Self]) -> io::Result<()> {
                keys.iter().try_for_each(|&key| writer.$write::<LittleEndian>(key))
            }
        }
    };
}

impl_partial_key!(u16, read_u16_into, write_u16);
impl_partial_key!(u32, read_u32_into, write_u32);
impl_partial_key!(u64, read_u64_into, write_u64);

/// The operations the solver and the opening book need from a table,
/// independent of its partial key width.
pub trait ScoreTable {
    /// The value stored for `key`, or 0 if absent.
    fn get(&self, key: u64) -> u8;

    /// Store `value` for `key`, replacing whatever held its slot.
    fn put(&mut self, key: u64, value: u8);

    /// Empty every slot without releasing memory.
    fn reset(&mut self);

    /// Number of slots.
    fn len(&self) -> usize;

    /// Size of a stored key in bytes.
    fn key_bytes(&self) -> usize;

    /// Size of a stored value in bytes.
    fn value_bytes(&self) -> usize {
        1
    }

    /// `log2` of the slot count, rounded down.
    fn log_size(&self) -> u8 {
        (usize::BITS - 1 - self.len().leading_zeros()) as u8
    }

    /// Replace all keys, then all values, with raw data from `reader`.
    fn read_from(&mut self, reader: &mut dyn Read) -> io::Result<()>;

    /// Write all keys, then all values, as raw data.
    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()>;
}

/// A table storing `K`-sized partial keys and one byte per slot.
#[derive(Clone, Debug)]
pub struct TranspositionTable<K> {
    keys: Vec<K>,
    values: Vec<u8>,
}

impl<K: PartialKey> TranspositionTable<K> {
    /// Allocate the smallest prime number of slots above `2^log_size`.
    pub fn new(log_size: u8) -> Self {
        let len = next_prime(1 << log_size) as usize;
        Self {
            keys: vec![K::default(); len],
            values: vec![0; len],
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.keys.len() as u64) as usize
    }
}

impl<K: PartialKey> ScoreTable for TranspositionTable<K> {
    #[inline]
    fn get(&self, key: u64) -> u8 {
        let i = self.index(key);
        if self.keys[i] == K::truncate(key) {
            self.values[i]
        } else {
            0
        }
    }

    #[inline]
    fn put(&mut self, key: u64, value: u8) {
        let i = self.index(key);
        self.keys[i] = K::truncate(key);
        self.values[i] = value;
    }

    fn reset(&mut self) {
        self.keys.fill(K::default());
        self.values.fill(0);
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn key_bytes(&self) -> usize {
        K::BYTES
    }

    fn read_from(&mut self, reader: &mut dyn Read) -> io::Result<()> {
        K::read_keys(reader, &mut self.keys)?;
        reader.read_exact(&mut self.values)
    }

    fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        K::write_keys(writer, &self.keys)?;
        writer.write_all(&self.values)
    }
}

/// Build an empty table for an opening book with the given key width and size.
pub fn new_table(key_bytes: u8, log_size: u8) -> Result<Box<dyn ScoreTable>, BookError> {
    if !matches!(key_bytes, 1 | 2 | 4) {
        return Err(BookError::InvalidKeySize { found: key_bytes });
    }
    if !SUPPORTED_LOG_SIZES.contains(&log_size) {
        return Err(BookError::UnsupportedLogSize { found: log_size });
    }

    let table: Box<dyn ScoreTable> = match key_bytes {
        1 => Box::new(TranspositionTable::<u8>::new(log_size)),
        2 => Box::new(TranspositionTable::<u16>::new(log_size)),
        _ => Box::new(TranspositionTable::<u32>::new(log_size)),
    };
    Ok(table)
}

/// The smallest prime greater than or equal to `n`.
pub fn next_prime(n: u64) -> u64 {
    let mut candidate = n;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}
