//! Defines the causal comparison trait shared by the vector timestamp types.

use crate::error::ClockError;
use crate::types::Relation;

/// Timestamps that can be placed in the happens-before partial order.
///
/// Only `compare` has to be provided; the predicates are thin wrappers over it.
pub trait CausalOrder {
    /// Compares two timestamps and defines the relation between them. Two timestamps may be
    /// equal, concurrent or in a causal (happens-before) relation.
    fn compare(&self, other: &Self) -> Result<Relation, ClockError>;

    /// Returns true if `self` happens before `other`. A false result means the timestamps
    /// are equal, concurrent, or `self` happens after `other`.
    fn is_happens_before(&self, other: &Self) -> Result<bool, ClockError> {
        Ok(self.compare(other)? == Relation::HappensBefore)
    }

    /// Returns true if `self` happens after `other`. A false result means the timestamps
    /// are equal, concurrent, or `self` happens before `other`.
    fn is_happens_after(&self, other: &Self) -> Result<bool, ClockError> {
        Ok(self.compare(other)? == Relation::HappensAfter)
    }

    /// Returns true if there is no causal relation between the timestamps.
    fn is_concurrent(&self, other: &Self) -> Result<bool, ClockError> {
        Ok(self.compare(other)? == Relation::Concurrent)
    }
}
