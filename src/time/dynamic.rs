//! Vector timestamp over a changing set of named processes.
//!
//! Processes join by first contact: merging a timestamp that mentions an unseen id
//! inserts it. Leaving takes two steps. First the entry is marked `removable`, which
//! every process keeps comparing against. The entry is deleted only once the removal is
//! causally stable, meaning every live process has acknowledged the mark.
//!
//! Acknowledgements travel inside the timestamp itself: each time a process produces a
//! new timestamp it adds its id to `acknowledged_by` of every removable entry it holds,
//! and merges take the union of those sets. Deleted ids are kept in a `removed` set that
//! is also unioned on merge, so a stale timestamp can't bring an entry back and peers
//! that have not pruned yet drop it on contact. Ids are therefore single-use: a process
//! that comes back must join under a fresh id. Comparisons read the same set: an entry
//! the other side has removed is not counted against it.

use std::collections::{BTreeMap, BTreeSet};

use crate::causal::CausalOrder;
use crate::error::ClockError;
use crate::time::logical::LogicalTimestamp;
use crate::types::{ProcessId, Relation};

/// Per-process slot of a [`DynamicVectorTimestamp`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ProcessEntry {
    pub timestamp: LogicalTimestamp,
    pub removable: bool,
    /// Processes known to have observed `removable`. Empty while the entry is live.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub acknowledged_by: BTreeSet<ProcessId>,
}

impl ProcessEntry {
    pub fn new(timestamp: LogicalTimestamp) -> Self {
        ProcessEntry {
            timestamp,
            removable: false,
            acknowledged_by: BTreeSet::new(),
        }
    }

    /// Combines two views of the same process: later timestamp, OR of the removable
    /// flags, union of the acknowledgements.
    fn merged(&self, other: &ProcessEntry) -> ProcessEntry {
        ProcessEntry {
            timestamp: LogicalTimestamp::later(self.timestamp, other.timestamp),
            removable: self.removable || other.removable,
            acknowledged_by: self
                .acknowledged_by
                .union(&other.acknowledged_by)
                .cloned()
                .collect(),
        }
    }
}

/// Immutable mapping from process id to [`ProcessEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DynamicVectorTimestamp {
    entries: BTreeMap<ProcessId, ProcessEntry>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    removed: BTreeSet<ProcessId>,
}

impl DynamicVectorTimestamp {
    /// Creates a timestamp that knows only `process_id`, at the initial time.
    pub fn new(process_id: impl Into<ProcessId>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(process_id.into(), ProcessEntry::default());
        DynamicVectorTimestamp::from_entries(entries)
    }

    /// Creates a timestamp with an initial entry per process.
    pub fn from_processes<I, P>(processes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProcessId>,
    {
        DynamicVectorTimestamp::from_entries(
            processes
                .into_iter()
                .map(|p| (p.into(), ProcessEntry::default()))
                .collect(),
        )
    }

    pub fn from_entries(entries: BTreeMap<ProcessId, ProcessEntry>) -> Self {
        DynamicVectorTimestamp {
            entries,
            removed: BTreeSet::new(),
        }
    }

    pub fn contains(&self, process_id: &ProcessId) -> bool {
        self.entries.contains_key(process_id)
    }

    pub fn get(&self, process_id: &ProcessId) -> Option<&ProcessEntry> {
        self.entries.get(process_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn processes(&self) -> impl Iterator<Item = &ProcessId> {
        self.entries.keys()
    }

    pub fn entries(&self) -> &BTreeMap<ProcessId, ProcessEntry> {
        &self.entries
    }

    /// Ids whose entries were deleted after a stable removal.
    pub fn removed(&self) -> &BTreeSet<ProcessId> {
        &self.removed
    }

    /// Returns a timestamp that happens after this one, advancing `local`.
    pub fn next(&self, local: &ProcessId) -> Result<DynamicVectorTimestamp, ClockError> {
        let mut entries = self.entries.clone();
        let entry = entries
            .get_mut(local)
            .ok_or_else(|| ClockError::UnknownProcess(local.clone()))?;
        entry.timestamp = entry.timestamp.next();

        acknowledge_removals(&mut entries, local);
        Ok(DynamicVectorTimestamp {
            entries,
            removed: self.removed.clone(),
        })
    }

    /// Returns a timestamp that happens after both this one and `merge`.
    ///
    /// The key sets are unioned. Entries known to one side only are carried over, which is
    /// how a new process joins, unless either side already removed that id.
    pub fn next_with(
        &self,
        local: &ProcessId,
        merge: &DynamicVectorTimestamp,
    ) -> Result<DynamicVectorTimestamp, ClockError> {
        if !self.entries.contains_key(local) {
            return Err(ClockError::UnknownProcess(local.clone()));
        }

        let removed: BTreeSet<ProcessId> = self.removed.union(&merge.removed).cloned().collect();
        let mut entries = self.entries.clone();
        entries.retain(|id, _| {
            let keep = id == local || !removed.contains(id);
            if !keep {
                tracing::debug!(process = %id, "process removed by peer");
            }
            keep
        });

        for (process_id, theirs) in &merge.entries {
            if process_id != local && removed.contains(process_id) {
                continue;
            }
            match entries.get_mut(process_id) {
                Some(own) => *own = own.merged(theirs),
                None => {
                    tracing::debug!(process = %process_id, "observed new process");
                    entries.insert(process_id.clone(), theirs.clone());
                }
            }
        }

        if let Some(entry) = entries.get_mut(local) {
            entry.timestamp = entry.timestamp.next();
        }

        acknowledge_removals(&mut entries, local);
        Ok(DynamicVectorTimestamp { entries, removed })
    }

    /// Marks `process_id` as removable. The entry stays until the removal is stable.
    pub fn mark_process_as_removable(
        &self,
        process_id: &ProcessId,
    ) -> Result<DynamicVectorTimestamp, ClockError> {
        let mut entries = self.entries.clone();
        let entry = entries
            .get_mut(process_id)
            .ok_or_else(|| ClockError::UnknownProcess(process_id.clone()))?;
        if !entry.removable {
            tracing::debug!(process = %process_id, "process marked as removable");
            entry.removable = true;
        }
        Ok(DynamicVectorTimestamp {
            entries,
            removed: self.removed.clone(),
        })
    }

    /// Returns true if `process_id` is removable and every other process that is not
    /// itself leaving has acknowledged it.
    pub fn is_removal_stable(&self, process_id: &ProcessId) -> bool {
        match self.entries.get(process_id) {
            Some(entry) if entry.removable => self
                .entries
                .iter()
                .filter(|(id, other)| *id != process_id && !other.removable)
                .all(|(id, _)| entry.acknowledged_by.contains(id)),
            _ => false,
        }
    }

    /// Deletes the entry of `process_id` once its removal is causally stable.
    pub fn remove_process(
        &self,
        process_id: &ProcessId,
    ) -> Result<DynamicVectorTimestamp, ClockError> {
        let entry = self
            .entries
            .get(process_id)
            .ok_or_else(|| ClockError::UnknownProcess(process_id.clone()))?;
        if !entry.removable {
            return Err(ClockError::NotRemovable(process_id.clone()));
        }
        if !self.is_removal_stable(process_id) {
            return Err(ClockError::RemovalNotStable(process_id.clone()));
        }

        let mut entries = self.entries.clone();
        entries.remove(process_id);
        for other in entries.values_mut() {
            other.acknowledged_by.remove(process_id);
        }
        let mut removed = self.removed.clone();
        removed.insert(process_id.clone());
        tracing::debug!(process = %process_id, "process removed");
        Ok(DynamicVectorTimestamp { entries, removed })
    }

    /// Removes every entry whose removal is stable and returns the removed ids.
    pub fn prune(&self) -> (DynamicVectorTimestamp, Vec<ProcessId>) {
        self.prune_except(None)
    }

    pub(crate) fn prune_except(
        &self,
        keep: Option<&ProcessId>,
    ) -> (DynamicVectorTimestamp, Vec<ProcessId>) {
        let stable: Vec<ProcessId> = self
            .entries
            .keys()
            .filter(|id| Some(*id) != keep && self.is_removal_stable(id))
            .cloned()
            .collect();

        let mut entries = self.entries.clone();
        let mut removed = self.removed.clone();
        for id in &stable {
            entries.remove(id);
            removed.insert(id.clone());
            tracing::debug!(process = %id, "process pruned");
        }
        for other in entries.values_mut() {
            other.acknowledged_by.retain(|id| !stable.contains(id));
        }
        (DynamicVectorTimestamp { entries, removed }, stable)
    }
}

/// Records that `local` has observed every removable entry in `entries`.
fn acknowledge_removals(entries: &mut BTreeMap<ProcessId, ProcessEntry>, local: &ProcessId) {
    for entry in entries.values_mut().filter(|e| e.removable) {
        if !entry.acknowledged_by.contains(local) {
            entry.acknowledged_by.insert(local.clone());
        }
    }
}

impl CausalOrder for DynamicVectorTimestamp {
    /// Compares over the union of process ids.
    ///
    /// A process present on one side only counts as later on that side, removable or not.
    /// It is skipped when the other side has already removed that id: removal is only
    /// stable after the pruning side observed the final value of the entry. Never fails.
    fn compare(&self, other: &DynamicVectorTimestamp) -> Result<Relation, ClockError> {
        let mut relation = Relation::Equal;
        let ids: BTreeSet<&ProcessId> = self.entries.keys().chain(other.entries.keys()).collect();

        for id in ids {
            let step = match (self.entries.get(id), other.entries.get(id)) {
                (Some(own), Some(theirs)) => {
                    if own.timestamp.is_before(&theirs.timestamp) {
                        Relation::HappensBefore
                    } else if own.timestamp.is_after(&theirs.timestamp) {
                        Relation::HappensAfter
                    } else {
                        Relation::Equal
                    }
                }
                (Some(_), None) if !other.removed.contains(id) => Relation::HappensAfter,
                (None, Some(_)) if !self.removed.contains(id) => Relation::HappensBefore,
                _ => Relation::Equal,
            };

            match step {
                Relation::HappensBefore if relation == Relation::HappensAfter => {
                    return Ok(Relation::Concurrent)
                }
                Relation::HappensAfter if relation == Relation::HappensBefore => {
                    return Ok(Relation::Concurrent)
                }
                Relation::HappensBefore | Relation::HappensAfter => relation = step,
                _ => {}
            }
        }
        Ok(relation)
    }
}
