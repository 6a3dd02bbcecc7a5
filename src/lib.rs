#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Causal-Clock provides causality-tracking primitives for distributed systems.
//!
//! Logical (scalar) clocks and vector clocks order events and detect concurrency without
//! synchronized physical time. Timestamps are immutable values that can be compared by
//! anyone holding two of them; clocks are lock-free holders that advance a process's
//! current timestamp under concurrent access.
//!
//! Process identity, transport of timestamps and persistence are left to the caller.

// Module for shared types (Relation, ProcessId).
pub mod types;

// Module for the causal comparison trait.
pub mod causal;

// Module for immutable timestamp values.
pub mod time;

// Module for the lock-free clock holders.
pub mod clock;

// Module for clock error types.
pub mod error;

// Builders for downstream tests.
#[cfg(feature = "test-utils")]
pub mod testing;

pub use causal::CausalOrder;
pub use clock::{DynamicVectorClock, LogicalClock, VectorClock};
pub use error::{ClockError, ErrorKind};
pub use time::{DynamicVectorTimestamp, LogicalTimestamp, ProcessEntry, VectorTimestamp};
pub use types::{ProcessId, Relation};
