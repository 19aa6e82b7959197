//! Single-byte encoding of score bounds, shared by the transposition table
//! and the opening book file format.
//!
//! Upper bounds occupy `1..=MAX_SCORE - MIN_SCORE + 1` and lower bounds the
//! values above it. `0` means "no entry".

use connect4::{MAX_SCORE, MIN_SCORE};

/// Largest encoded upper bound. Anything above is a lower bound.
const MAX_UPPER: i32 = MAX_SCORE - MIN_SCORE + 1;

/// Offset added to a lower bound score.
const LOWER_OFFSET: i32 = MAX_SCORE - 2 * MIN_SCORE + 2;

/// A bound on the score of a position, from the side to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bound {
    /// The true score is at most this value.
    Upper(i32),
    /// The true score is at least this value.
    Lower(i32),
}

impl Bound {
    /// Encode into a nonzero table byte.
    #[inline]
    pub fn encode(self) -> u8 {
        match self {
            Bound::Upper(score) => {
                debug_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
                (score - MIN_SCORE + 1) as u8
            }
            Bound::Lower(score) => {
                debug_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
                (score + LOWER_OFFSET) as u8
            }
        }
    }

    /// Decode a table byte. Returns `None` for an empty entry.
    #[inline]
    pub fn decode(value: u8) -> Option<Self> {
        match value as i32 {
            0 => None,
            v if v > MAX_UPPER => Some(Bound::Lower(v - LOWER_OFFSET)),
            v => Some(Bound::Upper(v + MIN_SCORE - 1)),
        }
    }
}

/// Encode the exact score of an opening book entry.
#[inline]
pub fn encode_exact(score: i32) -> u8 {
    Bound::Upper(score).encode()
}

/// Decode an opening book entry into an exact score.
/// Book entries always use the upper bound encoding.
#[inline]
pub fn decode_exact(value: u8) -> Option<i32> {
    match value {
        0 => None,
        v => Some(v as i32 + MIN_SCORE - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_round_trip() {
        for score in MIN_SCORE..=MAX_SCORE {
            assert_eq!(Bound::decode(Bound::Upper(score).encode()), Some(Bound::Upper(score)));
        }
    }

    #[test]
    fn lower_bound_round_trip() {
        for score in MIN_SCORE..=MAX_SCORE {
            assert_eq!(Bound::decode(Bound::Lower(score).encode()), Some(Bound::Lower(score)));
        }
    }

    #[test]
    fn encodings_are_disjoint_and_nonzero() {
        let max_upper = Bound::Upper(MAX_SCORE).encode();
        let min_lower = Bound::Lower(MIN_SCORE).encode();
        assert_eq!(Bound::Upper(MIN_SCORE).encode(), 1);
        assert!(max_upper < min_lower);
        assert_eq!(max_upper as i32, MAX_UPPER);
    }

    #[test]
    fn zero_is_empty() {
        assert_eq!(Bound::decode(0), None);
        assert_eq!(decode_exact(0), None);
    }

    #[test]
    fn exact_scores_use_upper_encoding() {
        for score in MIN_SCORE..=MAX_SCORE {
            assert_eq!(encode_exact(score), Bound::Upper(score).encode());
            assert_eq!(decode_exact(encode_exact(score)), Some(score));
        }
    }
}
