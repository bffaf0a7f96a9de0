//! The `Patient` record.

use rtc_core::{DAYS_PER_WEEK, Day, PatientId};

/// Where a patient is in the care pathway.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatientState {
    /// In the backlog, not yet admitted.
    Waiting,
    /// Admitted; receives one session per day a slot-unit is available.
    InTreatment,
    /// Terminal.  `day` is the day the last required session was delivered.
    Completed { day: Day },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    pub id:          PatientId,
    pub arrival_day: Day,
    /// Course length drawn from the case mix (1..=6).
    pub course_weeks: u8,
    /// Sessions prescribed at arrival: `course_weeks × 5`.  Never changes.
    pub prescribed_days: u32,
    /// Sessions delivered so far.
    pub completed_days: u32,
    /// One per interruption.  Only ever grows.
    pub penalty_days: u32,
    /// Sessions delivered in an overtime slot.
    pub overtime_sessions: u32,
    pub admitted_day: Option<Day>,
    pub state: PatientState,
}

impl Patient {
    pub fn new(id: PatientId, arrival_day: Day, course_weeks: u8) -> Self {
        Self {
            id,
            arrival_day,
            course_weeks,
            prescribed_days:   course_weeks as u32 * DAYS_PER_WEEK as u32,
            completed_days:    0,
            penalty_days:      0,
            overtime_sessions: 0,
            admitted_day:      None,
            state:             PatientState::Waiting,
        }
    }

    /// Sessions needed to finish, including interruption penalties.
    #[inline]
    pub fn required_days(&self) -> u32 {
        self.prescribed_days + self.penalty_days
    }

    #[inline]
    pub fn remaining_days(&self) -> u32 {
        self.required_days().saturating_sub(self.completed_days)
    }

    pub fn completion_day(&self) -> Option<Day> {
        match self.state {
            PatientState::Completed { day } => Some(day),
            _ => None,
        }
    }

    /// Days from arrival to completion; `None` until completed.
    pub fn wait_days(&self) -> Option<u64> {
        self.completion_day().map(|d| d.since(self.arrival_day))
    }

    /// Days from arrival to admission; `None` while still waiting.
    pub fn admission_wait_days(&self) -> Option<u64> {
        self.admitted_day.map(|d| d.since(self.arrival_day))
    }

    pub fn treated_under_overtime(&self) -> bool {
        self.overtime_sessions > 0
    }
}
