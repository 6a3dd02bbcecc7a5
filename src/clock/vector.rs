//! Lock-free vector clock for a fixed set of processes.

use std::convert::Infallible;
use std::sync::Arc;

use crate::clock::cell::CasCell;
use crate::error::ClockError;
use crate::time::vector::VectorTimestamp;

/// Vector clock of one process in a system whose process count and index order never
/// change. Stores and updates the local vector time without blocking.
#[derive(Debug)]
pub struct VectorClock {
    time: CasCell<VectorTimestamp>,
    process_index: usize,
}

impl VectorClock {
    /// Creates a clock for `process_index` among `process_count` processes, all at the
    /// initial time.
    pub fn new(process_index: usize, process_count: usize) -> Result<Self, ClockError> {
        Self::with_initial(process_index, VectorTimestamp::new(process_count))
    }

    /// Creates a clock for `process_index` starting at `initial`.
    pub fn with_initial(
        process_index: usize,
        initial: VectorTimestamp,
    ) -> Result<Self, ClockError> {
        initial.check_index(process_index)?;
        Ok(VectorClock {
            time: CasCell::new(initial),
            process_index,
        })
    }

    pub fn process_index(&self) -> usize {
        self.process_index
    }

    /// Returns the current value of the clock.
    pub fn time(&self) -> Arc<VectorTimestamp> {
        self.time.load()
    }

    /// Advances the local slot and returns the newly set value.
    pub fn tick(&self) -> Arc<VectorTimestamp> {
        let index = self.process_index;
        match self.time.update(|current| Ok::<_, Infallible>(current.advanced(index))) {
            Ok(next) => next,
            Err(never) => match never {},
        }
    }

    /// Advances the clock so that the new value happens after both the previous value and
    /// `happens_before`. Fails if the vectors differ in length.
    pub fn tick_with(
        &self,
        happens_before: &VectorTimestamp,
    ) -> Result<Arc<VectorTimestamp>, ClockError> {
        let index = self.process_index;
        self.time.update(|current| current.next_with(index, happens_before))
    }
}
