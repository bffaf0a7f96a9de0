//! `DisruptionCalendar` — future disruptions indexed by day.
//!
//! `BTreeMap` keeps days ordered so the engine can take exactly one day's
//! entry per step.  Overlaps are resolved when the day is taken: a closure
//! covers every LINAC, and breakdowns on the same LINAC merge into a single
//! suspension (see [`Suspension::merge`]).

use std::collections::BTreeMap;

use rtc_capacity::Suspension;
use rtc_core::{Day, LinacId};

use crate::{DisruptionEvent, DisruptionKind, DisruptionTarget};

/// Everything that disrupts one day, already collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayDisruptions {
    /// Center closed: every LINAC is fully suspended.
    pub closure: bool,
    /// Breakdown suspensions by LINAC, one entry per machine.
    pub breakdowns: BTreeMap<LinacId, Suspension>,
    /// Breakdown episodes whose first day is today.
    pub new_breakdowns: usize,
}

impl DayDisruptions {
    pub fn is_empty(&self) -> bool {
        !self.closure && self.breakdowns.is_empty()
    }

    fn record(&mut self, event: &DisruptionEvent) {
        match (event.kind, event.target) {
            (DisruptionKind::Closure, _) | (_, DisruptionTarget::AllLinacs) => {
                self.closure = true;
            }
            (DisruptionKind::Breakdown, DisruptionTarget::Linac(linac)) => {
                self.breakdowns
                    .entry(linac)
                    .and_modify(|s| *s = s.merge(event.suspension))
                    .or_insert(event.suspension);
                if event.starts_episode() {
                    self.new_breakdowns += 1;
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DisruptionCalendar {
    inner: BTreeMap<Day, Vec<DisruptionEvent>>,
}

impl DisruptionCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, event: DisruptionEvent) {
        self.inner.entry(event.day).or_default().push(event);
    }

    pub fn schedule_all(&mut self, events: impl IntoIterator<Item = DisruptionEvent>) {
        for event in events {
            self.schedule(event);
        }
    }

    /// Remove and collapse everything scheduled for `day`.
    pub fn take_day(&mut self, day: Day) -> DayDisruptions {
        let mut today = DayDisruptions::default();
        if let Some(events) = self.inner.remove(&day) {
            for event in &events {
                today.record(event);
            }
        }
        today
    }

    /// Events scheduled for `day` without removing them.
    pub fn peek(&self, day: Day) -> &[DisruptionEvent] {
        self.inner.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total (day, event) entries still pending.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
