//! Error types for rtc-output.

use std::fmt;

use thiserror::Error;

/// Which part of the run output a failed write belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// The daily metrics row for this day.
    Daily { day: u64 },
    Summary,
    /// Flushing and closing the output files.
    Finish,
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Daily { day } => write!(f, "daily metrics for day {day}"),
            OutputTarget::Summary       => f.write_str("run summary"),
            OutputTarget::Finish        => f.write_str("closing output"),
        }
    }
}

/// Errors that can occur when writing run output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// A backend error tagged with the output it was writing.
    #[error("writing {target}: {source}")]
    Write {
        target: OutputTarget,
        #[source]
        source: Box<OutputError>,
    },
}

impl OutputError {
    /// Tag this error with the output being written.  Already tagged errors
    /// keep their original target.
    pub fn during(self, target: OutputTarget) -> Self {
        match self {
            tagged @ OutputError::Write { .. } => tagged,
            other => OutputError::Write { target, source: Box::new(other) },
        }
    }

    /// The output that failed, if known.
    pub fn target(&self) -> Option<OutputTarget> {
        match self {
            OutputError::Write { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
