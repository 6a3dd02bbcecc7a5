//! Lock-free vector clock for a process set that changes at runtime.

use std::convert::Infallible;
use std::sync::Arc;

use crate::clock::cell::CasCell;
use crate::error::ClockError;
use crate::time::dynamic::DynamicVectorTimestamp;
use crate::types::ProcessId;

/// Dynamic vector clock of one process.
///
/// Other processes join when a merged timestamp first mentions them and leave through
/// [`DynamicVectorClock::mark_process_as_removable`] followed by removal once every
/// live process acknowledged the mark.
#[derive(Debug)]
pub struct DynamicVectorClock {
    time: CasCell<DynamicVectorTimestamp>,
    process_id: ProcessId,
}

impl DynamicVectorClock {
    /// Creates a clock that initially knows only its own process.
    pub fn new(process_id: impl Into<ProcessId>) -> Self {
        let process_id = process_id.into();
        DynamicVectorClock {
            time: CasCell::new(DynamicVectorTimestamp::new(process_id.clone())),
            process_id,
        }
    }

    /// Creates a clock starting at `initial`, which must contain `process_id`.
    pub fn with_initial(
        process_id: impl Into<ProcessId>,
        initial: DynamicVectorTimestamp,
    ) -> Result<Self, ClockError> {
        let process_id = process_id.into();
        if !initial.contains(&process_id) {
            return Err(ClockError::UnknownProcess(process_id));
        }
        Ok(DynamicVectorClock {
            time: CasCell::new(initial),
            process_id,
        })
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    /// Returns the current value of the clock.
    pub fn time(&self) -> Arc<DynamicVectorTimestamp> {
        self.time.load()
    }

    /// Advances the local entry and returns the newly set value.
    pub fn tick(&self) -> Result<Arc<DynamicVectorTimestamp>, ClockError> {
        self.time.update(|current| current.next(&self.process_id))
    }

    /// Merges `happens_before` into the clock and advances the local entry.
    pub fn tick_with(
        &self,
        happens_before: &DynamicVectorTimestamp,
    ) -> Result<Arc<DynamicVectorTimestamp>, ClockError> {
        self.time
            .update(|current| current.next_with(&self.process_id, happens_before))
    }

    /// Marks `process_id` as removable. This is a local event: the clock ticks so the mark
    /// and this process's acknowledgement travel with the next timestamp sent.
    pub fn mark_process_as_removable(
        &self,
        process_id: &ProcessId,
    ) -> Result<Arc<DynamicVectorTimestamp>, ClockError> {
        self.time.update(|current| {
            current
                .mark_process_as_removable(process_id)?
                .next(&self.process_id)
        })
    }

    /// Announces that this process is leaving.
    pub fn leave(&self) -> Result<Arc<DynamicVectorTimestamp>, ClockError> {
        self.mark_process_as_removable(&self.process_id)
    }

    /// Deletes the entry of `process_id` once its removal is causally stable.
    pub fn remove_process(
        &self,
        process_id: &ProcessId,
    ) -> Result<Arc<DynamicVectorTimestamp>, ClockError> {
        if *process_id == self.process_id {
            return Err(ClockError::LocalProcessRemoval(process_id.clone()));
        }
        self.time.update(|current| current.remove_process(process_id))
    }

    /// Deletes every other process whose removal is stable and returns their ids.
    pub fn prune(&self) -> Vec<ProcessId> {
        let mut pruned = Vec::new();
        let outcome = self.time.update(|current| {
            let (next, removed) = current.prune_except(Some(&self.process_id));
            pruned = removed;
            Ok::<_, Infallible>(next)
        });
        match outcome {
            Ok(_) => pruned,
            Err(never) => match never {},
        }
    }
}
