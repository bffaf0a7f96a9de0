//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `daily_metrics` and `run_summary`.

use std::path::Path;

use rusqlite::Connection;

use crate::{DailyMetricsRow, OutputResult, SummaryRow};
use crate::writer::OutputWriter;

/// Writes run output to an SQLite database.
///
/// Daily rows are buffered in one transaction per simulated week.
pub struct SqliteWriter {
    conn:     Connection,
    pending:  Vec<DailyMetricsRow>,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS daily_metrics (
                 day                 INTEGER PRIMARY KEY,
                 week                INTEGER NOT NULL,
                 backlog             INTEGER NOT NULL,
                 in_treatment        INTEGER NOT NULL,
                 overtime_treatments INTEGER NOT NULL,
                 completed           INTEGER NOT NULL,
                 capacity_slots      INTEGER NOT NULL,
                 overtime_linacs     INTEGER NOT NULL,
                 suspended_linacs    INTEGER NOT NULL,
                 interrupted         INTEGER NOT NULL,
                 deferred            INTEGER NOT NULL,
                 idle_slots          INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_summary (
                 days                     INTEGER NOT NULL,
                 patients_generated       INTEGER NOT NULL,
                 patients_treated         INTEGER NOT NULL,
                 remaining_waiting        INTEGER NOT NULL,
                 remaining_in_treatment   INTEGER NOT NULL,
                 mean_wait_days           REAL    NOT NULL,
                 median_wait_days         REAL    NOT NULL,
                 max_wait_days            INTEGER NOT NULL,
                 mean_admission_wait_days REAL    NOT NULL,
                 max_backlog              INTEGER NOT NULL,
                 overtime_linac_days      INTEGER NOT NULL,
                 overtime_patients        INTEGER NOT NULL,
                 overtime_sessions        INTEGER NOT NULL,
                 breakdown_count          INTEGER NOT NULL,
                 breakdown_slots_lost     INTEGER NOT NULL,
                 closure_days             INTEGER NOT NULL,
                 interruptions            INTEGER NOT NULL,
                 deferred_sessions        INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, pending: Vec::new(), finished: false })
    }

    fn flush_daily(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO daily_metrics \
                 (day, week, backlog, in_treatment, overtime_treatments, completed, \
                  capacity_slots, overtime_linacs, suspended_linacs, interrupted, \
                  deferred, idle_slots) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in self.pending.drain(..) {
                stmt.execute(rusqlite::params![
                    row.day,
                    row.week,
                    row.backlog,
                    row.in_treatment,
                    row.overtime_treatments,
                    row.completed,
                    row.capacity_slots,
                    row.overtime_linacs,
                    row.suspended_linacs,
                    row.interrupted,
                    row.deferred,
                    row.idle_slots,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_daily(&mut self, row: &DailyMetricsRow) -> OutputResult<()> {
        self.pending.push(*row);
        // Last working day of the week.
        if row.day % 5 == 4 {
            self.flush_daily()?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summary \
             (days, patients_generated, patients_treated, remaining_waiting, \
              remaining_in_treatment, mean_wait_days, median_wait_days, max_wait_days, \
              mean_admission_wait_days, max_backlog, overtime_linac_days, overtime_patients, \
              overtime_sessions, breakdown_count, breakdown_slots_lost, closure_days, interruptions, \
              deferred_sessions) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            rusqlite::params![
                row.days,
                row.patients_generated,
                row.patients_treated,
                row.remaining_waiting,
                row.remaining_in_treatment,
                row.mean_wait_days,
                row.median_wait_days,
                row.max_wait_days,
                row.mean_admission_wait_days,
                row.max_backlog,
                row.overtime_linac_days,
                row.overtime_patients,
                row.overtime_sessions,
                row.breakdown_count,
                row.breakdown_slots_lost,
                row.closure_days,
                row.interruptions,
                row.deferred_sessions,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.flush_daily()?;
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
