//!
//! Defines error types for clock and timestamp operations.
//!
//! Every error is a precondition violation detected synchronously. Nothing here is
//! retryable: the caller has to avoid the condition by construction.

use crate::types::ProcessId;

/// Broad category of a [`ClockError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value or a pair of values failed validation (negative count, length mismatch, bad encoding...).
    Validation,
    /// A process index fell outside the vector.
    Index,
    /// A process id is not part of a dynamic vector's membership.
    UnknownProcess,
}

/// Represents errors that can occur while constructing, advancing or comparing timestamps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A logical timestamp was constructed with a negative count.
    #[error("Count can't be negative: {0}")]
    NegativeCount(i64),
    /// Two vector timestamps of different length were compared or merged.
    #[error("Timestamp vectors length do not match: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The local process index is outside `[0, len)`.
    #[error("Process index {index} out of bounds for vector of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// The process id is absent from the dynamic vector.
    #[error("Unknown process ID: {0}")]
    UnknownProcess(ProcessId),
    /// Removal was requested for a process that was never marked as removable.
    #[error("Process {0} is not marked as removable")]
    NotRemovable(ProcessId),
    /// Removal was requested before every live process acknowledged the marking.
    #[error("Removal of process {0} is not causally stable yet")]
    RemovalNotStable(ProcessId),
    /// A clock was asked to remove its own process entry.
    #[error("Clock can't remove its own process {0}")]
    LocalProcessRemoval(ProcessId),
    /// Bytes could not be decoded into a timestamp.
    #[error("Invalid timestamp encoding: {0}")]
    InvalidEncoding(String),
}

impl ClockError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClockError::IndexOutOfBounds { .. } => ErrorKind::Index,
            ClockError::UnknownProcess(_) => ErrorKind::UnknownProcess,
            ClockError::NegativeCount(_)
            | ClockError::LengthMismatch { .. }
            | ClockError::NotRemovable(_)
            | ClockError::RemovalNotStable(_)
            | ClockError::LocalProcessRemoval(_)
            | ClockError::InvalidEncoding(_) => ErrorKind::Validation,
        }
    }
}
