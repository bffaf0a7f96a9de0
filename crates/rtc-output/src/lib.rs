//! `rtc-output` — run output writers for the radiotherapy center simulator.
//!
//! A run produces two record streams: one [`DailyMetricsRow`] per simulated
//! day and a single [`SummaryRow`] at the horizon.  Each backend writes both,
//! selected by Cargo feature:
//!
//! | Feature   | Backend | Daily metrics            | Run summary            |
//! |-----------|---------|--------------------------|------------------------|
//! | *(none)*  | CSV     | `daily_metrics.csv`      | `run_summary.csv`      |
//! | `sqlite`  | SQLite  | `output.db:daily_metrics`| `output.db:run_summary`|
//! | `parquet` | Parquet | `daily_metrics.parquet`  | `run_summary.parquet`  |
//!
//! SQLite and Parquet commit daily rows one simulated week at a time.
//!
//! [`SimOutputObserver`] drives any [`OutputWriter`] from the day loop and
//! keeps the first failure, tagged with the [`OutputTarget`] being written.
//!
//! ```rust,ignore
//! let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new("./output"))?);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("{e}"); // e.g. "writing daily metrics for day 12: I/O error: …"
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult, OutputTarget};
pub use observer::SimOutputObserver;
pub use row::{DailyMetricsRow, SummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
