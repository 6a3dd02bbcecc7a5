//! Mutable clock holders.
//!
//! Each clock owns a single register with the process's current timestamp. Every update
//! is a lock-free compare-and-swap retry loop; nothing here blocks or spawns.

mod cell;
pub mod dynamic;
pub mod logical;
pub mod vector;


// Re-export the clock types so `crate::clock::*` paths stay short.
pub use dynamic::DynamicVectorClock;
pub use logical::LogicalClock;
pub use vector::VectorClock;
