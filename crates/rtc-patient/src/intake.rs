//! Weekly patient intake.
//!
//! Once per week the intake process emits a fixed-size batch of new patients
//! and then sleeps for [`DAYS_PER_WEEK`] days.  Each patient's course length
//! is drawn from the case mix with a `WeightedIndex`, so a week-`k` share of
//! `p` % yields roughly `p` % of patients on a `k`-week course.

use rand::distributions::{Distribution, WeightedIndex};

use rtc_core::{CaseMix, DAYS_PER_WEEK, Day, PatientId, RtcError, RtcResult, SimRng};

use crate::Patient;

#[derive(Clone, Debug)]
pub struct PatientIntake {
    batch_size: u32,
    course_weeks: WeightedIndex<f64>,
    next_id: u32,
}

impl PatientIntake {
    /// Fails with `InvalidConfiguration` if the mix has no positive weight.
    pub fn new(batch_size: u32, case_mix: &CaseMix) -> RtcResult<Self> {
        let course_weeks = WeightedIndex::new(case_mix.weights().iter().copied())
            .map_err(|e| RtcError::invalid("case_mix", e.to_string()))?;
        Ok(Self { batch_size, course_weeks, next_id: 0 })
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Total patients generated so far.
    pub fn generated(&self) -> u32 {
        self.next_id
    }

    /// Generate one batch arriving on `day`.
    pub fn generate(&mut self, day: Day, rng: &mut SimRng) -> Vec<Patient> {
        (0..self.batch_size)
            .map(|_| {
                let weeks = self.course_weeks.sample(rng.inner()) as u8 + 1;
                let id = PatientId(self.next_id);
                self.next_id += 1;
                Patient::new(id, day, weeks)
            })
            .collect()
    }

    /// The intake sleeps for exactly one week between batches.
    pub fn next_wake(&self, day: Day) -> Day {
        day + DAYS_PER_WEEK
    }
}
