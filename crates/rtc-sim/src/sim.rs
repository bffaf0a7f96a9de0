//! The `Sim` struct and its day loop.

use rtc_capacity::{CapacityPool, Suspension};
use rtc_core::{CenterConfig, Day, LinacId, SimClock, SimRng};
use rtc_disruption::{DayDisruptions, DisruptionCalendar, DisruptionGenerator};
use rtc_patient::{Backlog, Patient, PatientIntake, SessionOutcome, TreatmentProcess};

use crate::{
    MetricsSnapshot, OvertimeController, Phase, RunSummary, SimError, SimObserver, SimResult,
    TreatmentScheduler, WakeQueue,
};

// ── Run-wide disruption counters ──────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub(crate) struct DisruptionTotals {
    pub breakdowns:  u64,
    pub slots_lost:  u64,
    pub closures:    u64,
    pub interrupted: u64,
}

/// Counters that only live for one day.
#[derive(Default)]
struct DayTally {
    interrupted:         usize,
    overtime_treatments: usize,
    deferred:            usize,
    idle_slots:          u32,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns all run state and resumes its processes through a day-indexed
/// [`WakeQueue<Phase>`].  Every patient is in exactly one of `backlog`,
/// `active` or `completed`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Validated configuration the run was built from.
    pub config: CenterConfig,

    pub clock: SimClock,

    pub pool: CapacityPool,

    /// Patients waiting for admission, in arrival order.
    pub backlog: Backlog,

    /// Treatment processes in admission order.
    pub active: Vec<TreatmentProcess>,

    /// Completed patients in completion order.
    pub completed: Vec<Patient>,

    pub intake: PatientIntake,
    pub scheduler: TreatmentScheduler,
    pub overtime: OvertimeController,

    pub(crate) generators: Vec<Box<dyn DisruptionGenerator>>,
    pub(crate) calendar: DisruptionCalendar,
    pub(crate) wake_queue: WakeQueue<Phase>,

    /// Case-mix draws.
    pub(crate) intake_rng: SimRng,
    /// Breakdown draws, kept apart so disruptions never shift the case mix.
    pub(crate) disruption_rng: SimRng,

    pub(crate) disruptions: DisruptionTotals,
    pub(crate) max_backlog: usize,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current day to the horizon.
    ///
    /// Calls observer hooks at every day boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        while !self.clock.is_finished() {
            self.advance_one_day(observer)?;
        }
        let summary = self.summary();
        log::info!(
            "run finished after {} days: {} treated, {} waiting, {} in treatment",
            summary.days,
            summary.patients_treated,
            summary.remaining_waiting,
            summary.remaining_in_treatment,
        );
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Run up to `n` days from the current position, stopping at the horizon.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_days<O: SimObserver>(
        &mut self,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<Vec<MetricsSnapshot>> {
        let n = n.min(self.clock.remaining_days());
        (0..n).map(|_| self.advance_one_day(observer)).collect()
    }

    /// Simulate the current day and move the clock to the next one.
    ///
    /// Fails with [`SimError::HorizonReached`] once every configured day has
    /// been simulated.
    pub fn advance_one_day<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<MetricsSnapshot> {
        let day = self.clock.current_day;
        if self.clock.is_finished() {
            return Err(SimError::HorizonReached(day));
        }

        observer.on_day_start(day);
        let mut tally = DayTally::default();

        for phase in self.wake_queue.drain_day(day) {
            match phase {
                Phase::Generator(index) => self.wake_generator(index, day),
                Phase::Disruptions => tally.interrupted = self.apply_disruptions(day, observer),
                Phase::Overtime => {
                    if let Some(change) = self.overtime.evaluate(day, self.backlog.len(), &mut self.pool) {
                        observer.on_overtime_change(day, change);
                    }
                }
                Phase::Scheduler => {
                    let report =
                        self.scheduler.schedule(day, &self.pool, &mut self.active, &mut self.backlog);
                    tally.deferred = report.deferred;
                    tally.idle_slots = report.idle_slots;
                }
                Phase::Treatment => tally.overtime_treatments = self.treat(day),
                Phase::Intake => {
                    let batch = self.intake.generate(day, &mut self.intake_rng);
                    log::debug!("{day}: {} new patients", batch.len());
                    self.backlog.extend(batch);
                    self.wake_queue.push(self.intake.next_wake(day), Phase::Intake);
                }
            }
            if Phase::DAILY.contains(&phase) {
                self.wake_queue.push(day + 1, phase);
            }
        }

        let snapshot = self.snapshot(day, tally);
        debug_assert_eq!(
            snapshot.population(),
            self.intake.generated() as usize,
            "patients lost on {day}",
        );
        self.max_backlog = self.max_backlog.max(snapshot.backlog);
        observer.on_day_end(&snapshot);

        self.clock.advance();
        Ok(snapshot)
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            days:                   self.clock.current_day.0,
            patients_generated:     self.intake.generated() as usize,
            patients_treated:       self.completed.len(),
            remaining_waiting:      self.backlog.len(),
            remaining_in_treatment: self.active.len(),
            max_backlog:            self.max_backlog,
            overtime_linac_days:    self.overtime.overtime_linac_days(),
            overtime_patients:      self.overtime.overtime_patients(),
            overtime_sessions:      self.overtime.overtime_sessions(),
            deferred_sessions:      self.scheduler.total_deferred(),
            breakdown_count:        self.disruptions.breakdowns,
            breakdown_slots_lost:   self.disruptions.slots_lost,
            closure_days:           self.disruptions.closures,
            interruptions:          self.disruptions.interrupted,
            ..RunSummary::default()
        };
        summary.set_waits(&self.completed, self.active.iter().map(TreatmentProcess::patient));
        summary
    }

    /// Events still pending in the disruption calendar.
    pub fn pending_disruptions(&self) -> usize {
        self.calendar.len()
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn wake_generator(&mut self, index: usize, day: Day) {
        let Some(generator) = self.generators.get_mut(index) else { return };
        let end = self.clock.end_day;
        let events = generator.wake(day, &self.pool, &mut self.disruption_rng);
        self.calendar.schedule_all(events.into_iter().filter(|e| e.day < end));
        if let Some(next) = generator.next_wake(day).filter(|&next| next > day) {
            self.wake_queue.push(next, Phase::Generator(index));
        }
    }

    /// Suspend today's disrupted LINACs and interrupt the affected
    /// processes.  Returns the number of processes interrupted.
    fn apply_disruptions<O: SimObserver>(&mut self, day: Day, observer: &mut O) -> usize {
        self.pool.clear_suspensions();
        let today = self.calendar.take_day(day);
        if today.is_empty() {
            return 0;
        }

        self.disruptions.breakdowns += today.new_breakdowns as u64;
        let interrupted = if today.closure {
            self.close_center(day)
        } else {
            self.break_down(day, &today)
        };

        self.disruptions.interrupted += interrupted as u64;
        observer.on_disruption(day, &today);
        interrupted
    }

    fn close_center(&mut self, day: Day) -> usize {
        self.pool.suspend_all(Suspension::Full);
        self.disruptions.closures += 1;
        let interrupted = self
            .active
            .iter_mut()
            .map(|process| process.interrupt(day))
            .filter(|&hit| hit)
            .count();
        log::info!("{day}: center closed, {interrupted} treatments interrupted");
        interrupted
    }

    fn break_down(&mut self, day: Day, today: &DayDisruptions) -> usize {
        let mut interrupted = 0;
        for (&linac, &suspension) in &today.breakdowns {
            if self.pool.suspend(linac, suspension).is_none() {
                log::warn!("{day}: breakdown for unknown {linac} ignored");
                continue;
            }
            let Some(state) = self.pool.linac(linac) else { continue };
            let lost = state.lost_slots();
            let available = state.available_slots() as usize;
            self.disruptions.slots_lost += u64::from(lost);

            let hit = interrupt_displaced(&mut self.active, day, linac, available);
            log::info!("{day}: {linac} down, {lost} slot-units lost, {hit} treatments interrupted");
            interrupted += hit;
        }
        interrupted
    }

    /// Deliver every session booked for today.  Returns the number delivered
    /// in overtime slots.
    fn treat(&mut self, day: Day) -> usize {
        let mut overtime_sessions = 0;
        let mut still_active = Vec::with_capacity(self.active.len());

        for mut process in self.active.drain(..) {
            let overtime = process.booking().is_some_and(|b| b.day == day && b.overtime);
            let outcome = process.deliver_booked_session(day);
            if outcome.is_some() && overtime {
                overtime_sessions += 1;
                self.overtime.record_session(process.patient());
            }
            if outcome == Some(SessionOutcome::Completed) {
                let patient = process.into_patient();
                log::debug!(
                    "{day}: {} completed after {} sessions",
                    patient.id,
                    patient.completed_days,
                );
                self.completed.push(patient);
            } else {
                still_active.push(process);
            }
        }

        self.active = still_active;
        overtime_sessions
    }

    fn snapshot(&self, day: Day, tally: DayTally) -> MetricsSnapshot {
        MetricsSnapshot {
            day,
            backlog:             self.backlog.len(),
            in_treatment:        self.active.len(),
            overtime_treatments: tally.overtime_treatments,
            completed:           self.completed.len(),
            capacity_slots:      self.pool.total_slots(),
            overtime_linacs:     self.pool.overtime_linac_count(),
            suspended_linacs:    self.pool.suspended_linac_count(),
            interrupted:         tally.interrupted,
            deferred:            tally.deferred,
            idle_slots:          tally.idle_slots,
        }
    }
}

// ── Breakdown helpers ─────────────────────────────────────────────────────────

/// Interrupt the processes bound to `linac` that no longer fit in its
/// `available` slot-units, latest admissions first.
///
/// The count never exceeds the slot-units the breakdown removed: yesterday's
/// bookings fit in the offered capacity, so only the lost part displaces
/// anyone.
fn interrupt_displaced(
    active:    &mut [TreatmentProcess],
    day:       Day,
    linac:     LinacId,
    available: usize,
) -> usize {
    let bound = active
        .iter()
        .filter(|p| p.bound_linac() == Some(linac))
        .count();
    let displaced = bound.saturating_sub(available);

    active
        .iter_mut()
        .rev()
        .filter(|p| p.bound_linac() == Some(linac))
        .take(displaced)
        .map(|p| p.interrupt(day))
        .filter(|&hit| hit)
        .count()
}
