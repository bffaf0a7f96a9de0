//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `daily_metrics.parquet`
//! - `run_summary.parquet`
//!
//! Daily rows are buffered and written as one record batch per simulated
//! week.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{DailyMetricsRow, OutputResult, SummaryRow};

fn daily_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("day",                 DataType::UInt64, false),
        Field::new("week",                DataType::UInt64, false),
        Field::new("backlog",             DataType::UInt64, false),
        Field::new("in_treatment",        DataType::UInt64, false),
        Field::new("overtime_treatments", DataType::UInt64, false),
        Field::new("completed",           DataType::UInt64, false),
        Field::new("capacity_slots",      DataType::UInt32, false),
        Field::new("overtime_linacs",     DataType::UInt32, false),
        Field::new("suspended_linacs",    DataType::UInt32, false),
        Field::new("interrupted",         DataType::UInt64, false),
        Field::new("deferred",            DataType::UInt64, false),
        Field::new("idle_slots",          DataType::UInt32, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    let field = |name: &str| {
        let ty = if name.starts_with("mean_") || name.starts_with("median_") {
            DataType::Float64
        } else {
            DataType::UInt64
        };
        Field::new(name, ty, false)
    };
    Arc::new(Schema::new(SummaryRow::HEADERS.iter().map(|&h| field(h)).collect::<Vec<_>>()))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn u64_column(values: impl Iterator<Item = u64>) -> ArrayRef {
    let mut builder = UInt64Builder::new();
    values.for_each(|v| builder.append_value(v));
    Arc::new(builder.finish())
}

fn u32_column(values: impl Iterator<Item = u32>) -> ArrayRef {
    let mut builder = UInt32Builder::new();
    values.for_each(|v| builder.append_value(v));
    Arc::new(builder.finish())
}

fn f64_column(value: f64) -> ArrayRef {
    let mut builder = Float64Builder::new();
    builder.append_value(value);
    Arc::new(builder.finish())
}

/// Writes run output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    daily:          Option<ArrowWriter<File>>,
    summary:        Option<ArrowWriter<File>>,
    daily_schema:   Arc<Schema>,
    summary_schema: Arc<Schema>,
    pending:        Vec<DailyMetricsRow>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let daily_schema = daily_schema();
        let summary_schema = summary_schema();

        let daily_file = File::create(dir.join("daily_metrics.parquet"))?;
        let daily = ArrowWriter::try_new(
            daily_file,
            Arc::clone(&daily_schema),
            Some(snappy_props()),
        )?;

        let summary_file = File::create(dir.join("run_summary.parquet"))?;
        let summary = ArrowWriter::try_new(
            summary_file,
            Arc::clone(&summary_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            daily: Some(daily),
            summary: Some(summary),
            daily_schema,
            summary_schema,
            pending: Vec::new(),
        })
    }

    fn flush_daily(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.daily.as_mut() else {
            return Ok(());
        };
        let rows = std::mem::take(&mut self.pending);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.daily_schema),
            vec![
                u64_column(rows.iter().map(|r| r.day)),
                u64_column(rows.iter().map(|r| r.week)),
                u64_column(rows.iter().map(|r| r.backlog)),
                u64_column(rows.iter().map(|r| r.in_treatment)),
                u64_column(rows.iter().map(|r| r.overtime_treatments)),
                u64_column(rows.iter().map(|r| r.completed)),
                u32_column(rows.iter().map(|r| r.capacity_slots)),
                u32_column(rows.iter().map(|r| r.overtime_linacs)),
                u32_column(rows.iter().map(|r| r.suspended_linacs)),
                u64_column(rows.iter().map(|r| r.interrupted)),
                u64_column(rows.iter().map(|r| r.deferred)),
                u32_column(rows.iter().map(|r| r.idle_slots)),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl OutputWriter for ParquetWriter {
    fn write_daily(&mut self, row: &DailyMetricsRow) -> OutputResult<()> {
        self.pending.push(*row);
        if row.day % 5 == 4 {
            self.flush_daily()?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summary.as_mut() else {
            return Ok(());
        };
        let one = |v: u64| u64_column(std::iter::once(v));

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summary_schema),
            vec![
                one(row.days),
                one(row.patients_generated),
                one(row.patients_treated),
                one(row.remaining_waiting),
                one(row.remaining_in_treatment),
                f64_column(row.mean_wait_days),
                f64_column(row.median_wait_days),
                one(row.max_wait_days),
                f64_column(row.mean_admission_wait_days),
                one(row.max_backlog),
                one(row.overtime_linac_days),
                one(row.overtime_patients),
                one(row.overtime_sessions),
                one(row.breakdown_count),
                one(row.breakdown_slots_lost),
                one(row.closure_days),
                one(row.interruptions),
                one(row.deferred_sessions),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_daily()?;
        if let Some(w) = self.daily.take() {
            w.close()?;
        }
        if let Some(w) = self.summary.take() {
            w.close()?;
        }
        Ok(())
    }
}
