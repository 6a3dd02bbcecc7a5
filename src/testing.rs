//! Helpers for building timestamps in tests.
//!
//! Only compiled with the `test-utils` feature.

use crate::time::{DynamicVectorTimestamp, LogicalTimestamp, VectorTimestamp};
use crate::types::ProcessId;

/// Builds an unflipped timestamp.
///
/// # Panics
///
/// Panics if `count` is negative.
pub fn logical(count: i64) -> LogicalTimestamp {
    LogicalTimestamp::from_count(count).expect("fixture count must not be negative")
}

/// Builds a vector of unflipped timestamps, e.g. `vector(&[1, 0, 2])`.
pub fn vector(counts: &[i64]) -> VectorTimestamp {
    counts.iter().map(|c| logical(*c)).collect()
}

/// Builds a dynamic timestamp where each process has been ticked `count` times.
pub fn dynamic(entries: &[(&str, i64)]) -> DynamicVectorTimestamp {
    let mut ts = DynamicVectorTimestamp::from_processes(entries.iter().map(|(id, _)| *id));
    for (id, count) in entries {
        let id = ProcessId::from(*id);
        for _ in 0..*count {
            ts = ts.next(&id).expect("fixture process is present");
        }
    }
    ts
}
