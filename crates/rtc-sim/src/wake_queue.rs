//! `WakeQueue` — sparse per-day process activation list.
//!
//! Every process in the engine is a suspended computation waiting for a day.
//! When a process finishes its work for a day it registers the day it needs
//! attention next; each step the engine drains only what is due.
//!
//! Draining returns the due processes sorted by their `Ord`, which is how the
//! engine gets its fixed same-day resume order without a second queue.

use std::collections::BTreeMap;

use rtc_core::Day;

/// A priority queue mapping days → processes that must resume on that day.
#[derive(Clone, Debug)]
pub struct WakeQueue<P> {
    inner: BTreeMap<Day, Vec<P>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl<P> Default for WakeQueue<P> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<P: Ord> WakeQueue<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `process` to resume on `day`.
    ///
    /// Duplicate entries for the same day are tolerated and collapse when
    /// drained.
    pub fn push(&mut self, day: Day, process: P) {
        self.inner.entry(day).or_default().push(process);
        self.total += 1;
    }

    /// Remove and return every process due on exactly `day`, in resume order
    /// and without duplicates.
    ///
    /// Returns an empty `Vec` if nothing is queued for that day.
    pub fn drain_day(&mut self, day: Day) -> Vec<P> {
        let Some(mut due) = self.inner.remove(&day) else {
            return Vec::new();
        };
        self.total -= due.len();
        due.sort();
        due.dedup();
        due
    }

    /// The earliest day with at least one queued process, or `None` if empty.
    pub fn next_day(&self) -> Option<Day> {
        self.inner.keys().next().copied()
    }

    /// `true` if `process` is queued for `day`.
    pub fn is_scheduled(&self, day: Day, process: &P) -> bool {
        self.inner.get(&day).is_some_and(|v| v.contains(process))
    }

    /// Total number of (day, process) entries across all future days.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
