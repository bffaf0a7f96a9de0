//! Simulation observer trait for progress reporting and data collection.

use rtc_core::Day;
use rtc_disruption::DayDisruptions;

use crate::{MetricsSnapshot, OvertimeChange, RunSummary};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — weekly progress printer
///
/// ```rust,ignore
/// struct WeeklyPrinter;
///
/// impl SimObserver for WeeklyPrinter {
///     fn on_day_end(&mut self, snapshot: &MetricsSnapshot) {
///         if snapshot.day.weekday() == 4 {
///             println!("{}: backlog {}", snapshot.day, snapshot.backlog);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each day, before any phase runs.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after today's disruptions were applied, only on disrupted days.
    fn on_disruption(&mut self, _day: Day, _disruptions: &DayDisruptions) {}

    /// Called when the overtime controller moves the overtime level.
    fn on_overtime_change(&mut self, _day: Day, _change: OvertimeChange) {}

    /// Called once per day with that day's metrics.
    fn on_day_end(&mut self, _snapshot: &MetricsSnapshot) {}

    /// Called once after the final day completes.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MetricsRecorder {
    pub snapshots: Vec<MetricsSnapshot>,
    pub overtime_changes: Vec<(Day, OvertimeChange)>,
    pub summary: Option<RunSummary>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for MetricsRecorder {
    fn on_overtime_change(&mut self, day: Day, change: OvertimeChange) {
        self.overtime_changes.push((day, change));
    }

    fn on_day_end(&mut self, snapshot: &MetricsSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        self.summary = Some(summary.clone());
    }
}
