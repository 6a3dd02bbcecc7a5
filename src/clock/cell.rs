//! Lock-free register holding an immutable value behind an `Arc`.
//!
//! Writers read the current value, compute a replacement and publish it with a
//! compare-and-swap against the pointer they read. A lost race retries from a fresh read,
//! so no caller ever blocks.

use std::fmt;
use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

pub(crate) struct CasCell<T> {
    inner: ArcSwap<T>,
}

impl<T> CasCell<T> {
    pub(crate) fn new(value: T) -> Self {
        CasCell {
            inner: ArcSwap::from_pointee(value),
        }
    }

    pub(crate) fn load(&self) -> Arc<T> {
        self.inner.load_full()
    }

    /// Replaces the current value with `f(current)` and returns the published value.
    ///
    /// `f` may run several times under contention and must be free of side effects. An
    /// error from `f` aborts the update and leaves the register untouched.
    pub(crate) fn update<F, E>(&self, mut f: F) -> Result<Arc<T>, E>
    where
        F: FnMut(&T) -> Result<T, E>,
    {
        let mut current = self.inner.load_full();
        loop {
            let next = Arc::new(f(&current)?);
            let previous = self.inner.compare_and_swap(&current, Arc::clone(&next));
            if Arc::ptr_eq(&*previous, &current) {
                return Ok(next);
            }
            tracing::trace!("lost compare-and-swap race, retrying");
            current = Guard::into_inner(previous);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CasCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CasCell").field(&*self.inner.load()).finish()
    }
}
