//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DailyMetricsRow, OutputResult, SummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one day's metrics.
    fn write_daily(&mut self, row: &DailyMetricsRow) -> OutputResult<()>;

    /// Write the end-of-run summary.  Called once per run.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
