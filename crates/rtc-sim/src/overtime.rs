//! Backlog-driven overtime control.
//!
//! Once a day the controller compares the backlog with its threshold and
//! moves the overtime level by at most one LINAC.  It never jumps straight to
//! the level the backlog would call for; the one-step rate limit is the
//! hysteresis that keeps capacity from oscillating.

use rtc_capacity::CapacityPool;
use rtc_core::{Day, LinacId};
use rtc_patient::Patient;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OvertimeChange {
    Enabled(LinacId),
    Disabled(LinacId),
}

#[derive(Clone, Debug)]
pub struct OvertimeController {
    threshold: usize,
    /// Sum over evaluated days of the number of LINACs on overtime.
    linac_days: u64,
    /// Sessions delivered in overtime slots.
    sessions: u64,
    /// Distinct patients with at least one overtime session.
    patients: u64,
    changes: u64,
}

impl OvertimeController {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            linac_days: 0,
            sessions:   0,
            patients:   0,
            changes:    0,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Run one control step and return the change made, if any.
    pub fn evaluate(
        &mut self,
        day:     Day,
        backlog: usize,
        pool:    &mut CapacityPool,
    ) -> Option<OvertimeChange> {
        let change = if backlog > self.threshold {
            pool.enable_overtime_on_next().map(OvertimeChange::Enabled)
        } else {
            pool.disable_overtime_on_last().map(OvertimeChange::Disabled)
        };

        match change {
            Some(OvertimeChange::Enabled(linac)) => {
                log::info!("{day}: backlog {backlog} > {}, overtime on for {linac}", self.threshold);
            }
            Some(OvertimeChange::Disabled(linac)) => {
                log::info!("{day}: backlog {backlog} <= {}, overtime off for {linac}", self.threshold);
            }
            None => {}
        }
        if change.is_some() {
            self.changes += 1;
        }

        self.linac_days += pool.overtime_linac_count() as u64;
        change
    }

    /// Account for one session delivered in an overtime slot.
    ///
    /// Call after the session is applied to `patient`.
    pub fn record_session(&mut self, patient: &Patient) {
        self.sessions += 1;
        if patient.overtime_sessions == 1 {
            self.patients += 1;
        }
    }

    pub fn overtime_linac_days(&self) -> u64 {
        self.linac_days
    }

    pub fn overtime_sessions(&self) -> u64 {
        self.sessions
    }

    pub fn overtime_patients(&self) -> u64 {
        self.patients
    }

    /// Number of days the overtime level moved.
    pub fn change_count(&self) -> u64 {
        self.changes
    }
}
