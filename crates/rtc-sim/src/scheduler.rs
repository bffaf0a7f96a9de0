//! FIFO admission and daily slot booking.
//!
//! The scheduler runs once a day after disruptions and overtime are settled:
//!
//! 1. every continuing process that was not interrupted today is booked onto
//!    a slot-unit, preferring the LINAC it used last;
//! 2. the backlog is admitted strictly from the front while slot-units
//!    remain.
//!
//! A continuing process that finds no free slot-unit waits for the next day
//! without penalty.  Nothing is ever preempted.

use rtc_capacity::{CapacityPool, SlotAllocator, SlotAssignment};
use rtc_core::Day;
use rtc_patient::{Backlog, Booking, TreatmentProcess};

/// What one scheduling step did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Continuing processes booked for today.
    pub continued: usize,
    /// Patients moved from the backlog into treatment today.
    pub admitted: usize,
    /// Continuing processes left without a slot-unit today.
    pub deferred: usize,
    /// Bookings placed in overtime slots.
    pub overtime_bookings: usize,
    /// Slot-units left unused.
    pub idle_slots: u32,
}

#[derive(Clone, Debug, Default)]
pub struct TreatmentScheduler {
    admitted: u64,
    deferred: u64,
}

impl TreatmentScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book today's sessions and admit from the backlog.
    ///
    /// Newly admitted processes are appended to `active`, which therefore
    /// stays in admission order.
    pub fn schedule(
        &mut self,
        day:     Day,
        pool:    &CapacityPool,
        active:  &mut Vec<TreatmentProcess>,
        backlog: &mut Backlog,
    ) -> ScheduleReport {
        let mut slots = SlotAllocator::new(pool);
        let mut report = ScheduleReport::default();

        // ── Continuing treatment first ────────────────────────────────────
        for process in active.iter_mut() {
            if process.is_completed() || process.is_interrupted_on(day) {
                continue;
            }
            match slots.assign(process.bound_linac()) {
                Some(slot) => {
                    process.book(booking(day, slot));
                    report.continued += 1;
                    report.overtime_bookings += usize::from(slot.overtime);
                }
                None => {
                    log::warn!("{day}: no slot-unit for {}, session deferred", process.patient().id);
                    process.unbind();
                    report.deferred += 1;
                }
            }
        }

        // ── FIFO admission ────────────────────────────────────────────────
        while !backlog.is_empty() {
            let Some(slot) = slots.assign(None) else { break };
            let Some(patient) = backlog.pop_front() else { break };
            let mut process = TreatmentProcess::admit(patient, day);
            process.book(booking(day, slot));
            log::debug!("{day}: admitted {} on {}", process.patient().id, slot.linac);
            active.push(process);
            report.admitted += 1;
            report.overtime_bookings += usize::from(slot.overtime);
        }

        report.idle_slots = slots.free_slots();
        self.admitted += report.admitted as u64;
        self.deferred += report.deferred as u64;
        report
    }

    /// Patients admitted over the whole run.
    pub fn total_admitted(&self) -> u64 {
        self.admitted
    }

    /// Sessions lost to a full center rather than to a disruption.
    pub fn total_deferred(&self) -> u64 {
        self.deferred
    }
}

fn booking(day: Day, slot: SlotAssignment) -> Booking {
    Booking { day, linac: slot.linac, overtime: slot.overtime }
}
