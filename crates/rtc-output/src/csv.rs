//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `daily_metrics.csv`
//! - `run_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{DailyMetricsRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes run output to two CSV files.
pub struct CsvWriter {
    daily:    Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut daily = Writer::from_path(dir.join("daily_metrics.csv"))?;
        daily.write_record(DailyMetricsRow::HEADERS)?;

        let mut summary = Writer::from_path(dir.join("run_summary.csv"))?;
        summary.write_record(SummaryRow::HEADERS)?;

        Ok(Self {
            daily,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_daily(&mut self, row: &DailyMetricsRow) -> OutputResult<()> {
        self.daily.write_record(&[
            row.day.to_string(),
            row.week.to_string(),
            row.backlog.to_string(),
            row.in_treatment.to_string(),
            row.overtime_treatments.to_string(),
            row.completed.to_string(),
            row.capacity_slots.to_string(),
            row.overtime_linacs.to_string(),
            row.suspended_linacs.to_string(),
            row.interrupted.to_string(),
            row.deferred.to_string(),
            row.idle_slots.to_string(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.days.to_string(),
            row.patients_generated.to_string(),
            row.patients_treated.to_string(),
            row.remaining_waiting.to_string(),
            row.remaining_in_treatment.to_string(),
            format!("{:.3}", row.mean_wait_days),
            format!("{:.1}", row.median_wait_days),
            row.max_wait_days.to_string(),
            format!("{:.3}", row.mean_admission_wait_days),
            row.max_backlog.to_string(),
            row.overtime_linac_days.to_string(),
            row.overtime_patients.to_string(),
            row.overtime_sessions.to_string(),
            row.breakdown_count.to_string(),
            row.breakdown_slots_lost.to_string(),
            row.closure_days.to_string(),
            row.interruptions.to_string(),
            row.deferred_sessions.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.daily.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
