//! Fixed-length vector timestamp.
//!
//! One [`LogicalTimestamp`] slot per process, indexed by a stable process index assigned
//! outside this crate. The process set, and so the length, is fixed at construction.

use std::fmt;

use crate::causal::CausalOrder;
use crate::error::ClockError;
use crate::time::logical::{LogicalTimestamp, ENCODED_LEN};
use crate::types::Relation;

/// Immutable vector of per-process logical timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VectorTimestamp {
    timestamps: Vec<LogicalTimestamp>,
}

impl VectorTimestamp {
    /// Creates a vector of `len` initial timestamps.
    pub fn new(len: usize) -> Self {
        VectorTimestamp {
            timestamps: vec![LogicalTimestamp::ZERO; len],
        }
    }

    pub fn from_timestamps(timestamps: Vec<LogicalTimestamp>) -> Self {
        VectorTimestamp { timestamps }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LogicalTimestamp> {
        self.timestamps.get(index).copied()
    }

    pub fn as_slice(&self) -> &[LogicalTimestamp] {
        &self.timestamps
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogicalTimestamp> {
        self.timestamps.iter()
    }

    /// Returns a timestamp that happens after this one, advancing only `local_index`.
    pub fn next(&self, local_index: usize) -> Result<VectorTimestamp, ClockError> {
        self.check_index(local_index)?;
        Ok(self.advanced(local_index))
    }

    /// Returns a timestamp that happens after both this one and `merge`.
    ///
    /// The slot at `local_index` is advanced; every other slot becomes the later of the
    /// two sides.
    pub fn next_with(
        &self,
        local_index: usize,
        merge: &VectorTimestamp,
    ) -> Result<VectorTimestamp, ClockError> {
        self.check_index(local_index)?;
        self.check_len(merge)?;

        let timestamps = self
            .timestamps
            .iter()
            .zip(merge.timestamps.iter())
            .enumerate()
            .map(|(i, (own, theirs))| {
                if i == local_index {
                    own.next()
                } else if own.is_before(theirs) {
                    *theirs
                } else {
                    *own
                }
            })
            .collect();
        Ok(VectorTimestamp { timestamps })
    }

    /// Encodes the vector as consecutive 8-byte timestamp words.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.timestamps.len() * ENCODED_LEN);
        for ts in &self.timestamps {
            bytes.extend_from_slice(&ts.to_bytes());
        }
        bytes
    }

    /// Decodes bytes produced by [`VectorTimestamp::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<VectorTimestamp, ClockError> {
        if bytes.len() % ENCODED_LEN != 0 {
            return Err(ClockError::InvalidEncoding(format!(
                "vector encoding length {} is not a multiple of {}",
                bytes.len(),
                ENCODED_LEN
            )));
        }
        bytes
            .chunks_exact(ENCODED_LEN)
            .map(LogicalTimestamp::try_from)
            .collect()
    }

    /// Advances a slot already known to be in range.
    pub(crate) fn advanced(&self, local_index: usize) -> VectorTimestamp {
        let mut timestamps = self.timestamps.clone();
        timestamps[local_index] = timestamps[local_index].next();
        VectorTimestamp { timestamps }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), ClockError> {
        if index >= self.timestamps.len() {
            return Err(ClockError::IndexOutOfBounds {
                index,
                len: self.timestamps.len(),
            });
        }
        Ok(())
    }

    fn check_len(&self, other: &VectorTimestamp) -> Result<(), ClockError> {
        if self.timestamps.len() != other.timestamps.len() {
            return Err(ClockError::LengthMismatch {
                expected: self.timestamps.len(),
                actual: other.timestamps.len(),
            });
        }
        Ok(())
    }
}

impl CausalOrder for VectorTimestamp {
    /// Pointwise dominance check.
    ///
    /// `HappensBefore` iff no slot of `self` exceeds the matching slot of `other` and at
    /// least one is strictly less; `HappensAfter` is the mirror; `Equal` iff all slots are
    /// equal; `Concurrent` otherwise.
    fn compare(&self, other: &VectorTimestamp) -> Result<Relation, ClockError> {
        self.check_len(other)?;

        let mut relation = Relation::Equal;
        for (own, theirs) in self.timestamps.iter().zip(other.timestamps.iter()) {
            if own.is_before(theirs) {
                if relation == Relation::HappensAfter {
                    return Ok(Relation::Concurrent);
                }
                relation = Relation::HappensBefore;
            } else if own.is_after(theirs) {
                if relation == Relation::HappensBefore {
                    return Ok(Relation::Concurrent);
                }
                relation = Relation::HappensAfter;
            }
        }
        Ok(relation)
    }
}

impl FromIterator<LogicalTimestamp> for VectorTimestamp {
    fn from_iter<I: IntoIterator<Item = LogicalTimestamp>>(iter: I) -> Self {
        VectorTimestamp {
            timestamps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for VectorTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ts) in self.timestamps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ts)?;
        }
        f.write_str("]")
    }
}
