//! Scalar logical timestamp with cyclic-overflow arithmetic.
//!
//! A timestamp is a `(count, flip)` pair. When `count` overflows it wraps to zero and
//! `flip` toggles, so a wrapped value still orders after the value it came from. The
//! whole pair fits in one 64-bit word: the most significant bit carries `flip` and the
//! remaining 63 bits carry `count`.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ClockError;

/// Mask selecting the `flip` bit of the wire word.
const FLIP_BIT: i64 = i64::MIN;

/// Size of the encoded timestamp in bytes.
pub const ENCODED_LEN: usize = 8;

/// Immutable point on a cyclic logical counter.
///
/// The order given by [`LogicalTimestamp::compare_to`] models one counter that may have
/// lapped the other once. It is not transitive across several laps, which is why this
/// type implements neither `Ord` nor `PartialOrd`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "i64", from = "i64")]
pub struct LogicalTimestamp {
    count: i64,
    flip: bool,
}

impl LogicalTimestamp {
    /// The initial timestamp of every process, `(0, false)`.
    pub const ZERO: LogicalTimestamp = LogicalTimestamp { count: 0, flip: false };

    /// Creates a timestamp, failing when `count` is negative.
    pub fn new(count: i64, flip: bool) -> Result<Self, ClockError> {
        if count < 0 {
            return Err(ClockError::NegativeCount(count));
        }
        Ok(LogicalTimestamp { count, flip })
    }

    /// Creates an unflipped timestamp.
    pub fn from_count(count: i64) -> Result<Self, ClockError> {
        Self::new(count, false)
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn flip(&self) -> bool {
        self.flip
    }

    /// Returns the timestamp immediately after this one.
    ///
    /// On overflow the count restarts at zero and the flip bit is reversed.
    #[must_use]
    pub fn next(&self) -> LogicalTimestamp {
        match self.count.checked_add(1) {
            Some(count) => LogicalTimestamp { count, flip: self.flip },
            None => LogicalTimestamp { count: 0, flip: !self.flip },
        }
    }

    /// Compares two timestamps on the cyclic counter.
    ///
    /// Equal flips compare counts numerically. Different flips compare counts reversed:
    /// the side that has not flipped yet is the earlier one.
    pub fn compare_to(&self, other: &LogicalTimestamp) -> Ordering {
        if self.flip == other.flip {
            self.count.cmp(&other.count)
        } else {
            other.count.cmp(&self.count)
        }
    }

    pub fn is_before(&self, other: &LogicalTimestamp) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    pub fn is_after(&self, other: &LogicalTimestamp) -> bool {
        self.compare_to(other) == Ordering::Greater
    }

    /// Returns whichever of `a` and `b` is not before the other, preferring `a` on ties.
    pub fn later(a: LogicalTimestamp, b: LogicalTimestamp) -> LogicalTimestamp {
        if a.is_before(&b) {
            b
        } else {
            a
        }
    }

    /// Encodes the timestamp as one 64-bit word with `flip` in the sign bit.
    pub fn to_long(&self) -> i64 {
        if self.flip {
            self.count | FLIP_BIT
        } else {
            self.count
        }
    }

    /// Decodes a word produced by [`LogicalTimestamp::to_long`]. Every `i64` is valid.
    pub fn from_long(value: i64) -> LogicalTimestamp {
        LogicalTimestamp {
            count: value & !FLIP_BIT,
            flip: value < 0,
        }
    }

    /// Encodes the timestamp as 8 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        self.to_long().to_be_bytes()
    }

    /// Decodes 8 big-endian bytes produced by [`LogicalTimestamp::to_bytes`].
    pub fn from_bytes(bytes: [u8; ENCODED_LEN]) -> LogicalTimestamp {
        Self::from_long(i64::from_be_bytes(bytes))
    }
}

impl From<LogicalTimestamp> for i64 {
    fn from(ts: LogicalTimestamp) -> i64 {
        ts.to_long()
    }
}

impl From<i64> for LogicalTimestamp {
    fn from(value: i64) -> Self {
        LogicalTimestamp::from_long(value)
    }
}

impl TryFrom<&[u8]> for LogicalTimestamp {
    type Error = ClockError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let word: [u8; ENCODED_LEN] = bytes.try_into().map_err(|_| {
            ClockError::InvalidEncoding(format!(
                "expected {} bytes, got {}",
                ENCODED_LEN,
                bytes.len()
            ))
        })?;
        Ok(LogicalTimestamp::from_bytes(word))
    }
}

impl fmt::Display for LogicalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flip {
            write!(f, "{}'", self.count)
        } else {
            write!(f, "{}", self.count)
        }
    }
}
