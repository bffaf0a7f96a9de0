//! Per-day snapshots and the end-of-run summary.

use rtc_core::Day;
use rtc_patient::Patient;

/// State of the center at the end of one simulated day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub day: Day,
    /// Patients waiting for admission.
    pub backlog: usize,
    /// Patients admitted but not yet completed.
    pub in_treatment: usize,
    /// Sessions delivered in overtime slots today.
    pub overtime_treatments: usize,
    /// Patients completed so far.
    pub completed: usize,
    /// Usable slot-units today after overtime and disruptions.
    pub capacity_slots: u32,
    pub overtime_linacs: usize,
    /// LINACs with any suspension today.
    pub suspended_linacs: usize,
    /// Treatment processes interrupted today.
    pub interrupted: usize,
    /// Continuing treatments that found no free slot-unit today.
    pub deferred: usize,
    /// Slot-units nobody was booked into today.
    pub idle_slots: u32,
}

impl MetricsSnapshot {
    /// Patients accounted for in this snapshot.
    pub fn population(&self) -> usize {
        self.backlog + self.in_treatment + self.completed
    }
}

/// Mean / median / max over a set of day counts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitStats {
    pub count:  usize,
    pub mean:   f64,
    pub median: f64,
    pub max:    u64,
}

impl WaitStats {
    /// All fields are zero for an empty sample.
    pub fn from_samples(mut samples: Vec<u64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        samples.sort_unstable();
        let count = samples.len();
        let mean = samples.iter().sum::<u64>() as f64 / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (samples[mid - 1] + samples[mid]) as f64 / 2.0
        } else {
            samples[mid] as f64
        };
        Self { count, mean, median, max: samples[count - 1] }
    }
}

/// End-of-run report.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Simulated days completed.
    pub days: u64,
    pub patients_generated: usize,
    pub patients_treated: usize,
    /// Still in the backlog at the horizon.
    pub remaining_waiting: usize,
    /// Still in treatment at the horizon.
    pub remaining_in_treatment: usize,
    /// Completion day − arrival day, over completed patients.
    pub wait: WaitStats,
    /// Admission day − arrival day, over admitted patients.
    pub admission_wait: WaitStats,
    pub max_backlog: usize,
    /// Sum over days of the number of LINACs on overtime.
    pub overtime_linac_days: u64,
    /// Distinct patients with at least one overtime session.
    pub overtime_patients: u64,
    pub overtime_sessions: u64,
    /// Sessions lost to a full center rather than to a disruption.
    pub deferred_sessions: u64,
    pub breakdown_count: u64,
    pub breakdown_slots_lost: u64,
    pub closure_days: u64,
    /// Interruptions that cost a patient a penalty day.
    pub interruptions: u64,
}

impl RunSummary {
    /// Fill the wait statistics from the completed and in-treatment patients.
    pub(crate) fn set_waits<'a>(
        &mut self,
        completed: &'a [Patient],
        admitted:  impl Iterator<Item = &'a Patient>,
    ) {
        self.wait = WaitStats::from_samples(completed.iter().filter_map(Patient::wait_days).collect());
        self.admission_wait = WaitStats::from_samples(
            completed
                .iter()
                .chain(admitted)
                .filter_map(Patient::admission_wait_days)
                .collect(),
        );
    }
}
