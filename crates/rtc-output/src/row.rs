//! Flat row types written by output backends.

use rtc_sim::{MetricsSnapshot, RunSummary};

/// One simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyMetricsRow {
    pub day:                 u64,
    pub week:                u64,
    pub backlog:             u64,
    pub in_treatment:        u64,
    pub overtime_treatments: u64,
    pub completed:           u64,
    pub capacity_slots:      u32,
    pub overtime_linacs:     u32,
    pub suspended_linacs:    u32,
    pub interrupted:         u64,
    pub deferred:            u64,
    pub idle_slots:          u32,
}

impl DailyMetricsRow {
    pub const HEADERS: [&'static str; 12] = [
        "day",
        "week",
        "backlog",
        "in_treatment",
        "overtime_treatments",
        "completed",
        "capacity_slots",
        "overtime_linacs",
        "suspended_linacs",
        "interrupted",
        "deferred",
        "idle_slots",
    ];
}

impl From<&MetricsSnapshot> for DailyMetricsRow {
    fn from(s: &MetricsSnapshot) -> Self {
        Self {
            day:                 s.day.0,
            week:                s.day.week(),
            backlog:             s.backlog as u64,
            in_treatment:        s.in_treatment as u64,
            overtime_treatments: s.overtime_treatments as u64,
            completed:           s.completed as u64,
            capacity_slots:      s.capacity_slots,
            overtime_linacs:     s.overtime_linacs as u32,
            suspended_linacs:    s.suspended_linacs as u32,
            interrupted:         s.interrupted as u64,
            deferred:            s.deferred as u64,
            idle_slots:          s.idle_slots,
        }
    }
}

/// The end-of-run summary, flattened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub days:                     u64,
    pub patients_generated:       u64,
    pub patients_treated:         u64,
    pub remaining_waiting:        u64,
    pub remaining_in_treatment:   u64,
    pub mean_wait_days:           f64,
    pub median_wait_days:         f64,
    pub max_wait_days:            u64,
    pub mean_admission_wait_days: f64,
    pub max_backlog:              u64,
    pub overtime_linac_days:      u64,
    pub overtime_patients:        u64,
    pub overtime_sessions:        u64,
    pub breakdown_count:          u64,
    pub breakdown_slots_lost:     u64,
    pub closure_days:             u64,
    pub interruptions:            u64,
    pub deferred_sessions:        u64,
}

impl SummaryRow {
    pub const HEADERS: [&'static str; 18] = [
        "days",
        "patients_generated",
        "patients_treated",
        "remaining_waiting",
        "remaining_in_treatment",
        "mean_wait_days",
        "median_wait_days",
        "max_wait_days",
        "mean_admission_wait_days",
        "max_backlog",
        "overtime_linac_days",
        "overtime_patients",
        "overtime_sessions",
        "breakdown_count",
        "breakdown_slots_lost",
        "closure_days",
        "interruptions",
        "deferred_sessions",
    ];
}

impl From<&RunSummary> for SummaryRow {
    fn from(s: &RunSummary) -> Self {
        Self {
            days:                     s.days,
            patients_generated:       s.patients_generated as u64,
            patients_treated:         s.patients_treated as u64,
            remaining_waiting:        s.remaining_waiting as u64,
            remaining_in_treatment:   s.remaining_in_treatment as u64,
            mean_wait_days:           s.wait.mean,
            median_wait_days:         s.wait.median,
            max_wait_days:            s.wait.max,
            mean_admission_wait_days: s.admission_wait.mean,
            max_backlog:              s.max_backlog as u64,
            overtime_linac_days:      s.overtime_linac_days,
            overtime_patients:        s.overtime_patients,
            overtime_sessions:        s.overtime_sessions,
            breakdown_count:          s.breakdown_count,
            breakdown_slots_lost:     s.breakdown_slots_lost,
            closure_days:             s.closure_days,
            interruptions:            s.interruptions,
            deferred_sessions:        s.deferred_sessions,
        }
    }
}
