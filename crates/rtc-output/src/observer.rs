//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use rtc_sim::{MetricsSnapshot, RunSummary, SimObserver};

use crate::row::{DailyMetricsRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, OutputTarget};

/// A [`SimObserver`] that writes daily metrics and the run summary to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error]; the error's
/// [`target`][OutputError::target] tells which output failed.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, target: OutputTarget, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e.during(target));
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_day_end(&mut self, snapshot: &MetricsSnapshot) {
        let row = DailyMetricsRow::from(snapshot);
        let result = self.writer.write_daily(&row);
        self.store_err(OutputTarget::Daily { day: row.day }, result);
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        let result = self.writer.write_summary(&SummaryRow::from(summary));
        self.store_err(OutputTarget::Summary, result);
        let result = self.writer.finish();
        self.store_err(OutputTarget::Finish, result);
    }
}
