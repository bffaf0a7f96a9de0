//! `TreatmentProcess` — the per-patient state machine while in treatment.
//!
//! ```text
//!   Waiting ──admit──▶ InTreatment ──deliver_session (last)──▶ Completed
//!                        │    ▲
//!                        └────┘ interrupt: session lost, +1 penalty day
//! ```
//!
//! A process is not tied to one LINAC.  The scheduler books it every day
//! onto whatever slot-unit is free, preferring the machine it used last.

use rtc_core::{Day, LinacId};

use crate::{Patient, PatientState};

/// Result of delivering one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Continuing,
    Completed,
}

/// A slot-unit reserved for one process on one day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub day:      Day,
    pub linac:    LinacId,
    pub overtime: bool,
}

#[derive(Clone, Debug)]
pub struct TreatmentProcess {
    patient: Patient,
    /// Machine of the most recent booking; cleared when a day passes
    /// without one.
    bound_linac: Option<LinacId>,
    booking: Option<Booking>,
    interrupted_on: Option<Day>,
}

impl TreatmentProcess {
    /// Take ownership of a patient popped from the backlog.
    pub fn admit(mut patient: Patient, day: Day) -> Self {
        debug_assert_eq!(patient.state, PatientState::Waiting);
        patient.state = PatientState::InTreatment;
        patient.admitted_day = Some(day);
        Self {
            patient,
            bound_linac: None,
            booking: None,
            interrupted_on: None,
        }
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn into_patient(self) -> Patient {
        self.patient
    }

    /// The LINAC this process is currently bound to.
    pub fn bound_linac(&self) -> Option<LinacId> {
        self.bound_linac
    }

    pub fn booking(&self) -> Option<Booking> {
        self.booking
    }

    /// Reserve today's slot-unit.
    pub fn book(&mut self, booking: Booking) {
        self.bound_linac = Some(booking.linac);
        self.booking = Some(booking);
    }

    /// No slot-unit was free today; the process waits without penalty.
    pub fn unbind(&mut self) {
        self.bound_linac = None;
        self.booking = None;
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.patient.state, PatientState::Completed { .. })
    }

    pub fn is_interrupted_on(&self, day: Day) -> bool {
        self.interrupted_on == Some(day)
    }

    /// Deliver an interruption for `day`.
    ///
    /// The day's session is lost and the requirement grows by one penalty
    /// day.  A second interruption on the same day is ignored, so
    /// overlapping disruptions never double-penalise.  Returns `true` when
    /// the interruption took effect.
    pub fn interrupt(&mut self, day: Day) -> bool {
        if self.is_completed() || self.is_interrupted_on(day) {
            return false;
        }
        self.interrupted_on = Some(day);
        self.patient.penalty_days += 1;
        self.unbind();
        log::debug!(
            "{day}: {} interrupted, {} of {} sessions done",
            self.patient.id,
            self.patient.completed_days,
            self.patient.required_days(),
        );
        true
    }

    /// Consume the slot-unit booked for `day`, if any.
    ///
    /// Returns `None` when nothing was booked for `day` (no capacity, or the
    /// day was interrupted).
    pub fn deliver_booked_session(&mut self, day: Day) -> Option<SessionOutcome> {
        let booking = self.booking.filter(|b| b.day == day)?;
        self.booking = None;
        Some(self.deliver_session(day, booking.overtime))
    }

    /// Consume one session on `day`.
    ///
    /// # Panics
    /// Panics in debug mode if the process was interrupted today or is
    /// already completed.
    pub fn deliver_session(&mut self, day: Day, overtime: bool) -> SessionOutcome {
        debug_assert!(!self.is_interrupted_on(day), "session on an interrupted day");
        debug_assert!(!self.is_completed(), "session after completion");

        self.patient.completed_days += 1;
        if overtime {
            self.patient.overtime_sessions += 1;
        }
        if self.patient.completed_days >= self.patient.required_days() {
            self.patient.state = PatientState::Completed { day };
            self.unbind();
            SessionOutcome::Completed
        } else {
            SessionOutcome::Continuing
        }
    }
}
