//! Lock-free scalar logical clock.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::time::logical::LogicalTimestamp;

/// Thread-safe holder of the local process's current [`LogicalTimestamp`].
///
/// The timestamp is packed into one atomic word using its wire encoding, so reads are a
/// single load and updates a compare-and-swap retry loop.
pub struct LogicalClock {
    /// Current time as `LogicalTimestamp::to_long`. Never moves backwards.
    word: AtomicI64,
}

impl LogicalClock {
    /// Creates a clock at the initial timestamp.
    pub const fn new() -> Self {
        LogicalClock {
            word: AtomicI64::new(0),
        }
    }

    /// Creates a clock starting at `initial`, e.g. when recovering persisted state.
    pub fn with_initial(initial: LogicalTimestamp) -> Self {
        LogicalClock {
            word: AtomicI64::new(initial.to_long()),
        }
    }

    /// Returns the current value of the clock.
    pub fn time(&self) -> LogicalTimestamp {
        LogicalTimestamp::from_long(self.word.load(Ordering::Acquire))
    }

    /// Advances the clock and returns the newly set value.
    pub fn tick(&self) -> LogicalTimestamp {
        self.advance(|current| current.next())
    }

    /// Advances the clock past both its current value and `happens_before`, a timestamp
    /// received from another process. Returns the newly set value.
    pub fn tick_with(&self, happens_before: LogicalTimestamp) -> LogicalTimestamp {
        self.advance(|current| {
            if current.is_after(&happens_before) {
                current.next()
            } else {
                happens_before.next()
            }
        })
    }

    fn advance<F>(&self, f: F) -> LogicalTimestamp
    where
        F: Fn(LogicalTimestamp) -> LogicalTimestamp,
    {
        let mut current = self.word.load(Ordering::Acquire);
        loop {
            let next = f(LogicalTimestamp::from_long(current));
            match self.word.compare_exchange_weak(
                current,
                next.to_long(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => {
                    tracing::trace!("lost compare-and-swap race, retrying");
                    current = actual;
                }
            }
        }
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogicalClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalClock").field("time", &self.time()).finish()
    }
}
