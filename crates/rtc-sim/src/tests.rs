//! Unit and scenario tests for rtc-sim.

#[cfg(test)]
mod fixtures {
    use rtc_capacity::{CapacityPool, Suspension};
    use rtc_core::{CaseMix, CenterConfig, Day, LinacId, SimRng};
    use rtc_disruption::{DisruptionEvent, DisruptionGenerator, DisruptionKind, DisruptionTarget};

    /// Two 8-slot LINACs, one-week courses, no disruptions, one week.
    pub fn small_center(weekly_new_patients: u32) -> CenterConfig {
        CenterConfig {
            linac_count: 2,
            patients_per_hour_per_linac: 1.0,
            treatment_day_hours: 8.0,
            weekly_new_patients,
            sim_weeks: 1,
            breakdown_duration_hours: 0.0,
            closure: None,
            case_mix: CaseMix::single(1).unwrap(),
            ..CenterConfig::default()
        }
    }

    /// Breaks one LINAC on one day.
    pub struct OneBreakdown {
        pub day:        Day,
        pub linac:      LinacId,
        pub suspension: Suspension,
    }

    impl DisruptionGenerator for OneBreakdown {
        fn kind(&self) -> DisruptionKind {
            DisruptionKind::Breakdown
        }

        fn first_wake(&self) -> Option<Day> {
            Some(self.day)
        }

        fn wake(&mut self, day: Day, _pool: &CapacityPool, _rng: &mut SimRng) -> Vec<DisruptionEvent> {
            vec![DisruptionEvent {
                kind:       DisruptionKind::Breakdown,
                target:     DisruptionTarget::Linac(self.linac),
                start_day:  day,
                day,
                suspension: self.suspension,
            }]
        }

        fn next_wake(&self, _day: Day) -> Option<Day> {
            None
        }
    }

    /// Schedules one breakdown far beyond any test horizon.
    pub struct FarFutureBreakdown;

    impl DisruptionGenerator for FarFutureBreakdown {
        fn kind(&self) -> DisruptionKind {
            DisruptionKind::Breakdown
        }

        fn first_wake(&self) -> Option<Day> {
            Some(Day::ZERO)
        }

        fn wake(&mut self, day: Day, _pool: &CapacityPool, _rng: &mut SimRng) -> Vec<DisruptionEvent> {
            vec![DisruptionEvent {
                kind:       DisruptionKind::Breakdown,
                target:     DisruptionTarget::Linac(LinacId(0)),
                start_day:  day,
                day:        Day(10_000),
                suspension: Suspension::Full,
            }]
        }

        fn next_wake(&self, _day: Day) -> Option<Day> {
            None
        }
    }
}

#[cfg(test)]
mod wake_queue_tests {
    use rtc_core::Day;

    use crate::{Phase, WakeQueue};

    #[test]
    fn drains_in_phase_order_without_duplicates() {
        let mut q = WakeQueue::new();
        q.push(Day(3), Phase::Intake);
        q.push(Day(3), Phase::Scheduler);
        q.push(Day(3), Phase::Generator(1));
        q.push(Day(3), Phase::Disruptions);
        q.push(Day(3), Phase::Scheduler);
        q.push(Day(4), Phase::Overtime);
        assert_eq!(q.len(), 6);
        assert_eq!(q.next_day(), Some(Day(3)));

        let due = q.drain_day(Day(3));
        assert_eq!(
            due,
            [Phase::Generator(1), Phase::Disruptions, Phase::Scheduler, Phase::Intake],
        );
        assert_eq!(q.len(), 1);
        assert!(q.is_scheduled(Day(4), &Phase::Overtime));
        assert!(q.drain_day(Day(3)).is_empty());
    }

    #[test]
    fn generators_resume_before_daily_phases() {
        assert!(Phase::Generator(usize::MAX) < Phase::Disruptions);
        assert!(Phase::Disruptions < Phase::Overtime);
        assert!(Phase::Overtime < Phase::Scheduler);
        assert!(Phase::Scheduler < Phase::Treatment);
        assert!(Phase::Treatment < Phase::Intake);
    }
}

#[cfg(test)]
mod overtime_tests {
    use rtc_capacity::CapacityPool;
    use rtc_core::{Day, LinacId};

    use crate::{OvertimeChange, OvertimeController};

    #[test]
    fn one_step_per_evaluation() {
        let mut pool = CapacityPool::new(3, 8, 2);
        let mut ctl = OvertimeController::new(10);

        assert_eq!(ctl.evaluate(Day(0), 50, &mut pool), Some(OvertimeChange::Enabled(LinacId(0))));
        assert_eq!(pool.overtime_linac_count(), 1);
        assert_eq!(ctl.evaluate(Day(1), 50, &mut pool), Some(OvertimeChange::Enabled(LinacId(1))));
        assert_eq!(ctl.evaluate(Day(2), 10, &mut pool), Some(OvertimeChange::Disabled(LinacId(1))));
        assert_eq!(ctl.evaluate(Day(3), 0, &mut pool), Some(OvertimeChange::Disabled(LinacId(0))));
        assert_eq!(ctl.evaluate(Day(4), 0, &mut pool), None);

        // 1 + 2 + 1 + 0 + 0 LINACs on overtime after each step.
        assert_eq!(ctl.overtime_linac_days(), 4);
        assert_eq!(ctl.change_count(), 4);
    }

    #[test]
    fn saturates_when_every_linac_is_on_overtime() {
        let mut pool = CapacityPool::new(2, 8, 2);
        let mut ctl = OvertimeController::new(10);
        for d in 0..5 {
            ctl.evaluate(Day(d), 11, &mut pool);
        }
        assert!(pool.all_overtime_enabled());
        assert_eq!(pool.overtime_slots(), 4);
        assert_eq!(ctl.change_count(), 2);
    }
}

#[cfg(test)]
mod scheduler_tests {
    use rtc_capacity::CapacityPool;
    use rtc_core::{Day, LinacId, PatientId};
    use rtc_patient::{Backlog, Patient, TreatmentProcess};

    use crate::TreatmentScheduler;

    fn backlog(n: u32) -> Backlog {
        let mut b = Backlog::new();
        b.extend((0..n).map(|i| Patient::new(PatientId(i), Day(0), 1)));
        b
    }

    #[test]
    fn admits_fifo_up_to_capacity() {
        let pool = CapacityPool::new(2, 3, 2);
        let mut active = Vec::new();
        let mut waiting = backlog(10);
        let report = TreatmentScheduler::new().schedule(Day(1), &pool, &mut active, &mut waiting);

        assert_eq!(report.admitted, 6);
        assert_eq!(report.idle_slots, 0);
        assert_eq!(waiting.len(), 4);
        assert_eq!(waiting.front().unwrap().id, PatientId(6));
        let ids: Vec<_> = active.iter().map(|p| p.patient().id.0).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn continuing_treatment_keeps_its_linac() {
        let pool = CapacityPool::new(2, 4, 0);
        let mut active = Vec::new();
        let mut waiting = backlog(6);
        let mut scheduler = TreatmentScheduler::new();
        scheduler.schedule(Day(1), &pool, &mut active, &mut waiting);
        let day1: Vec<_> = active.iter().map(|p| p.bound_linac()).collect();

        for p in &mut active {
            p.deliver_booked_session(Day(1));
        }
        let report = scheduler.schedule(Day(2), &pool, &mut active, &mut waiting);
        let day2: Vec<_> = active.iter().take(6).map(|p| p.bound_linac()).collect();

        assert_eq!(report.continued, 6);
        assert_eq!(day1, day2);
        assert_eq!(day1[4], Some(LinacId(1)));
        assert_eq!(scheduler.total_admitted(), 6);
    }

    #[test]
    fn interrupted_process_is_not_booked() {
        let pool = CapacityPool::new(1, 4, 0);
        let mut active = vec![TreatmentProcess::admit(Patient::new(PatientId(0), Day(0), 1), Day(0))];
        active[0].interrupt(Day(2));
        let mut waiting = Backlog::new();
        let report = TreatmentScheduler::new().schedule(Day(2), &pool, &mut active, &mut waiting);

        assert_eq!(report.continued, 0);
        assert_eq!(active[0].booking(), None);
        assert_eq!(report.idle_slots, 4);
    }

    #[test]
    fn overtime_slots_used_last() {
        let mut pool = CapacityPool::new(1, 2, 2);
        pool.enable_overtime_on_next();
        let mut active = Vec::new();
        let mut waiting = backlog(3);
        let report = TreatmentScheduler::new().schedule(Day(1), &pool, &mut active, &mut waiting);

        assert_eq!(report.admitted, 3);
        assert_eq!(report.overtime_bookings, 1);
        assert!(active[2].booking().unwrap().overtime);
        assert!(!active[1].booking().unwrap().overtime);
    }
}

#[cfg(test)]
mod metrics_tests {
    use crate::WaitStats;

    #[test]
    fn wait_stats() {
        let stats = WaitStats::from_samples(vec![7, 1, 3, 5]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.max, 7);

        let odd = WaitStats::from_samples(vec![9, 2, 4]);
        assert_eq!(odd.median, 4.0);
    }

    #[test]
    fn empty_sample_is_zero() {
        assert_eq!(WaitStats::from_samples(Vec::new()), WaitStats::default());
    }
}

#[cfg(test)]
mod sim_tests {
    use rtc_capacity::Suspension;
    use rtc_core::{CaseMix, CenterConfig, ClosurePolicy, Day, LinacId, PatientId};
    use rtc_disruption::ClosureGenerator;

    use super::fixtures::{FarFutureBreakdown, OneBreakdown, small_center};
    use crate::{MetricsRecorder, NoopObserver, SimBuilder, SimError};

    #[test]
    fn small_intake_needs_no_overtime() {
        let mut sim = SimBuilder::new(small_center(10)).build().unwrap();
        let mut recorder = MetricsRecorder::new();
        let summary = sim.run(&mut recorder).unwrap();

        assert_eq!(recorder.snapshots.len(), 5);
        assert_eq!(recorder.snapshots[0].backlog, 10, "intake closes the day");
        assert!(recorder.snapshots[1..].iter().all(|s| s.backlog == 0));
        assert_eq!(recorder.snapshots[1].in_treatment, 10);
        assert!(recorder.overtime_changes.is_empty());
        assert!(recorder.snapshots.iter().all(|s| s.overtime_linacs == 0));
        assert_eq!(summary.overtime_linac_days, 0);
        assert_eq!(summary.patients_generated, 10);
        assert_eq!(summary.max_backlog, 10);
        assert!(recorder.summary.is_some());
    }

    #[test]
    fn one_week_courses_complete_after_five_sessions() {
        let cfg = CenterConfig { sim_weeks: 2, ..small_center(10) };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        // Batch 1 is treated on days 1-5; batch 2 arrives on day 5.
        assert_eq!(summary.patients_generated, 20);
        assert_eq!(summary.patients_treated, 10);
        assert!(sim.completed.iter().all(|p| p.completion_day() == Some(Day(5))));
        assert_eq!(summary.wait.mean, 5.0);
        assert_eq!(summary.wait.max, 5);
    }

    #[test]
    fn large_intake_enables_overtime_on_one_linac() {
        let mut sim = SimBuilder::new(small_center(30)).build().unwrap();
        let days = sim.run_days(2, &mut NoopObserver).unwrap();

        assert_eq!(days[0].backlog, 30);
        assert_eq!(days[1].overtime_linacs, 1);
        assert!(sim.pool.linac(LinacId(0)).unwrap().overtime_enabled);
        assert!(!sim.pool.linac(LinacId(1)).unwrap().overtime_enabled);
        // 16 regular + 2 overtime slot-units.
        assert_eq!(days[1].in_treatment, 18);
        assert_eq!(days[1].backlog, 12);
        assert_eq!(days[1].overtime_treatments, 2);
    }

    #[test]
    fn shrinking_overtime_defers_sessions() {
        let mut sim = SimBuilder::new(small_center(30)).build().unwrap();
        let mut recorder = MetricsRecorder::new();
        let summary = sim.run(&mut recorder).unwrap();
        let days = &recorder.snapshots;

        // Day 0 schedules before the first batch arrives.
        assert_eq!(days[0].idle_slots, 16);
        assert_eq!(days[2].in_treatment, 20, "both LINACs on overtime");
        assert_eq!(days[2].idle_slots, 0);
        // Backlog at 10: overtime is withdrawn one LINAC a day while 20
        // patients are in treatment.
        assert_eq!(days[3].capacity_slots, 18);
        assert_eq!(days[3].deferred, 2);
        assert_eq!(days[4].capacity_slots, 16);
        assert_eq!(days[4].deferred, 4);
        assert_eq!(summary.deferred_sessions, 6);
        assert_eq!(sim.scheduler.total_deferred(), 6);
    }

    #[test]
    fn disruptions_past_horizon_are_dropped() {
        let mut sim = SimBuilder::new(small_center(0))
            .generator(Box::new(FarFutureBreakdown))
            .build()
            .unwrap();
        sim.run_days(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.pending_disruptions(), 0);
    }

    #[test]
    fn endless_breakdown_is_cut_at_horizon() {
        let cfg = CenterConfig {
            breakdown_duration_hours: 1e17,
            weekly_breakdown_probability: 1.0,
            ..small_center(4)
        };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.days, 5);
        assert_eq!(summary.breakdown_count, 2);
        assert_eq!(sim.pending_disruptions(), 0);
    }

    #[test]
    fn closure_costs_one_penalty_day() {
        let cfg = CenterConfig {
            weekly_new_patients: 1,
            sim_weeks: 3,
            case_mix: CaseMix::single(2).unwrap(),
            closure: Some(ClosurePolicy { interval_weeks: 2, weekday: 0 }),
            ..small_center(1)
        };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        // Admitted on day 1, treated days 1-4, closed on day 5 (its 5th
        // treatment day), then treated days 6-12.
        let first = sim.completed.iter().find(|p| p.id == PatientId(0)).unwrap();
        assert_eq!(first.penalty_days, 1);
        assert_eq!(first.required_days(), 11);
        assert_eq!(first.completed_days, 11);
        assert_eq!(first.completion_day(), Some(Day(12)));
        // The next closure, day 15, is past the horizon.
        assert_eq!(summary.closure_days, 1);
    }

    #[test]
    fn closure_interrupts_everyone_in_treatment() {
        let cfg = CenterConfig {
            sim_weeks: 2,
            case_mix: CaseMix::single(2).unwrap(),
            closure: Some(ClosurePolicy { interval_weeks: 1, weekday: 2 }),
            ..small_center(12)
        };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let days = sim.run_days(3, &mut NoopObserver).unwrap();

        assert_eq!(days[2].interrupted, 12);
        assert_eq!(days[2].capacity_slots, 0);
        assert_eq!(days[2].suspended_linacs, 2);
        assert!(sim.active.iter().all(|p| p.patient().penalty_days == 1));
    }

    #[test]
    fn breakdown_interrupts_only_displaced_patients() {
        let cfg = CenterConfig {
            linac_count: 1,
            case_mix: CaseMix::single(2).unwrap(),
            ..small_center(8)
        };
        let mut sim = SimBuilder::new(cfg)
            .without_default_generators()
            .generator(Box::new(OneBreakdown {
                day:        Day(3),
                linac:      LinacId(0),
                suspension: Suspension::Partial(2),
            }))
            .build()
            .unwrap();
        let days = sim.run_days(4, &mut NoopObserver).unwrap();

        assert_eq!(days[3].interrupted, 2);
        assert_eq!(days[3].capacity_slots, 6);
        let penalised: Vec<_> = sim
            .active
            .iter()
            .filter(|p| p.patient().penalty_days > 0)
            .map(|p| p.patient().id.0)
            .collect();
        assert_eq!(penalised, [6, 7], "latest admissions are displaced");

        let summary = sim.summary();
        assert_eq!(summary.breakdown_count, 1);
        assert_eq!(summary.breakdown_slots_lost, 2);
        assert_eq!(summary.interruptions, 2);
    }

    #[test]
    fn overlapping_disruptions_penalise_once() {
        let cfg = CenterConfig {
            sim_weeks: 2,
            case_mix: CaseMix::single(2).unwrap(),
            ..small_center(6)
        };
        let closure = ClosurePolicy { interval_weeks: 1, weekday: 3 };
        let mut sim = SimBuilder::new(cfg)
            .generator(Box::new(OneBreakdown {
                day:        Day(3),
                linac:      LinacId(0),
                suspension: Suspension::Full,
            }))
            .generator(Box::new(ClosureGenerator::new(closure)))
            .build()
            .unwrap();
        let days = sim.run_days(4, &mut NoopObserver).unwrap();

        assert_eq!(days[3].interrupted, 6);
        assert!(sim.active.iter().all(|p| p.patient().penalty_days == 1));
        assert_eq!(sim.summary().closure_days, 1);
    }

    #[test]
    fn horizon_is_enforced() {
        let mut sim = SimBuilder::new(small_center(1)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.run_days(3, &mut NoopObserver).unwrap().is_empty());
        match sim.advance_one_day(&mut NoopObserver) {
            Err(SimError::HorizonReached(day)) => assert_eq!(day, Day(5)),
            other => panic!("expected HorizonReached, got {:?}", other.map(|s| s.day)),
        }
    }

    #[test]
    fn invalid_configuration_rejected_before_running() {
        let cfg = CenterConfig {
            case_mix: CaseMix([10.0, 10.0, 10.0, 10.0, 10.0, 10.0]),
            ..CenterConfig::default()
        };
        match SimBuilder::new(cfg).build().err() {
            Some(SimError::Config(e)) => assert_eq!(e.field(), "case_mix"),
            other => panic!("expected a case_mix error, got {other:?}"),
        }

        let cfg = CenterConfig { linac_count: 0, ..CenterConfig::default() };
        assert!(matches!(SimBuilder::new(cfg).build().err(), Some(SimError::Config(_))));

        let cfg = CenterConfig { linac_count: 2, patients_per_hour_per_linac: 1e9, ..CenterConfig::default() };
        match SimBuilder::new(cfg).build().err() {
            Some(SimError::Config(e)) => assert_eq!(e.field(), "patients_per_hour_per_linac"),
            other => panic!("expected a capacity range error, got {other:?}"),
        }
    }

    #[test]
    fn same_seed_same_run() {
        let cfg = CenterConfig { sim_weeks: 12, weekly_breakdown_probability: 0.5, ..CenterConfig::default() };
        let run = |cfg: CenterConfig| {
            let mut recorder = MetricsRecorder::new();
            SimBuilder::new(cfg).build().unwrap().run(&mut recorder).unwrap();
            recorder.snapshots
        };
        assert_eq!(run(cfg.clone()), run(cfg));
    }
}

#[cfg(test)]
mod property_tests {
    use rtc_core::{CenterConfig, ClosurePolicy};

    use crate::{MetricsRecorder, SimBuilder};

    fn stressed(seed: u64) -> CenterConfig {
        CenterConfig {
            linac_count: 3,
            weekly_new_patients: 45,
            sim_weeks: 26,
            weekly_breakdown_probability: 0.4,
            breakdown_duration_hours: 14.0,
            closure: Some(ClosurePolicy { interval_weeks: 3, weekday: 1 }),
            seed,
            ..CenterConfig::default()
        }
    }

    fn record(cfg: CenterConfig) -> MetricsRecorder {
        let mut recorder = MetricsRecorder::new();
        SimBuilder::new(cfg).build().unwrap().run(&mut recorder).unwrap();
        recorder
    }

    #[test]
    fn overtime_stays_in_bounds_and_moves_one_step() {
        for seed in [1, 2, 3] {
            let cfg = stressed(seed);
            let per_linac = cfg.base_slots_per_linac() + cfg.overtime_slots_per_linac();
            let recorder = record(cfg.clone());

            let mut previous = 0;
            for s in &recorder.snapshots {
                assert!(s.overtime_linacs <= cfg.linac_count as usize);
                assert!(s.overtime_linacs.abs_diff(previous) <= 1, "jump on {}", s.day);
                assert!(s.capacity_slots <= per_linac * cfg.linac_count as u32);
                previous = s.overtime_linacs;
            }
        }
    }

    #[test]
    fn no_patient_is_lost() {
        for seed in [4, 5] {
            let cfg = stressed(seed);
            let recorder = record(cfg.clone());
            for s in &recorder.snapshots {
                let generated = cfg.weekly_new_patients as usize * (s.day.week() as usize + 1);
                assert_eq!(s.population(), generated, "on {}", s.day);
            }
            let summary = recorder.summary.unwrap();
            assert_eq!(
                summary.patients_treated + summary.remaining_waiting + summary.remaining_in_treatment,
                summary.patients_generated,
            );
        }
    }

    #[test]
    fn disruptions_happen_and_are_accounted() {
        let summary = record(stressed(6)).summary.unwrap();
        assert!(summary.breakdown_count > 0);
        assert!(summary.breakdown_slots_lost > 0);
        assert_eq!(summary.closure_days, 8, "weeks 2, 5, ..., 23 of 26");
        assert!(summary.interruptions > 0);
        assert!(summary.wait.count == summary.patients_treated);
    }
}
