//! Logical-time values: scalar, fixed vector and dynamic vector timestamps.
//!
//! Everything here is an immutable value; the mutable holders live in `crate::clock`.

pub mod dynamic;
pub mod logical;
pub mod vector;

// Re-export for convenience
pub use dynamic::{DynamicVectorTimestamp, ProcessEntry};
pub use logical::LogicalTimestamp;
pub use vector::VectorTimestamp;
