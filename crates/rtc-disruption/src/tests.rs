//! Unit tests for rtc-disruption.

#[cfg(test)]
mod calendar_tests {
    use rtc_capacity::Suspension;
    use rtc_core::{Day, LinacId};

    use crate::{DisruptionCalendar, DisruptionEvent, DisruptionKind, DisruptionTarget};

    fn breakdown(linac: u16, start: u64, day: u64, suspension: Suspension) -> DisruptionEvent {
        DisruptionEvent {
            kind:      DisruptionKind::Breakdown,
            target:    DisruptionTarget::Linac(LinacId(linac)),
            start_day: Day(start),
            day:       Day(day),
            suspension,
        }
    }

    #[test]
    fn take_day_removes_entry() {
        let mut cal = DisruptionCalendar::new();
        cal.schedule(breakdown(0, 3, 3, Suspension::Partial(4)));
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.peek(Day(3)).len(), 1);
        assert!(cal.peek(Day(4)).is_empty());

        let today = cal.take_day(Day(3));
        assert_eq!(today.breakdowns.get(&LinacId(0)), Some(&Suspension::Partial(4)));
        assert_eq!(today.new_breakdowns, 1);
        assert!(cal.is_empty());
        assert!(cal.take_day(Day(3)).is_empty());
    }

    #[test]
    fn overlapping_breakdowns_collapse() {
        let mut cal = DisruptionCalendar::new();
        cal.schedule_all([
            breakdown(1, 2, 3, Suspension::Partial(8)),
            breakdown(1, 3, 3, Suspension::Partial(5)),
        ]);
        let today = cal.take_day(Day(3));
        assert_eq!(today.breakdowns.len(), 1);
        assert_eq!(today.breakdowns[&LinacId(1)], Suspension::Partial(8));
        // Only the episode starting today is new.
        assert_eq!(today.new_breakdowns, 1);
    }

    #[test]
    fn closure_flagged() {
        let mut cal = DisruptionCalendar::new();
        cal.schedule(DisruptionEvent::closure(Day(19)));
        cal.schedule(breakdown(0, 19, 19, Suspension::Full));
        let today = cal.take_day(Day(19));
        assert!(today.closure);
        assert_eq!(today.breakdowns.len(), 1);
    }
}

#[cfg(test)]
mod breakdown_tests {
    use rtc_capacity::{CapacityPool, Suspension};
    use rtc_core::{Day, SimRng};

    use crate::{BreakdownGenerator, DisruptionGenerator, DisruptionTarget};

    fn generator(p: f64, hours: f64) -> BreakdownGenerator {
        BreakdownGenerator {
            weekly_probability: p,
            duration_hours:     hours,
            day_hours:          10.0,
            patients_per_hour:  4.0,
            horizon:            Day(100),
        }
    }

    #[test]
    fn short_breakdown_is_partial() {
        let days = generator(1.0, 2.0).episode_days(Day(3));
        assert_eq!(days, [(Day(3), Suspension::Partial(8))]);
    }

    #[test]
    fn long_breakdown_spans_days() {
        let days = generator(1.0, 24.0).episode_days(Day(3));
        assert_eq!(
            days,
            [
                (Day(3), Suspension::Full),
                (Day(4), Suspension::Full),
                (Day(5), Suspension::Partial(16)),
            ]
        );
    }

    #[test]
    fn whole_days_have_no_partial_tail() {
        let days = generator(1.0, 20.0).episode_days(Day(0));
        assert_eq!(days, [(Day(0), Suspension::Full), (Day(1), Suspension::Full)]);
    }

    #[test]
    fn episode_stops_at_horizon() {
        let days = generator(1.0, 1e6).episode_days(Day(95));
        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|&(d, s)| d < Day(100) && s == Suspension::Full));
        assert!(generator(1.0, 2.0).episode_days(Day(100)).is_empty());
    }

    #[test]
    fn huge_duration_terminates() {
        // Far beyond f64's integer precision at 10 h steps.
        let days = generator(1.0, 1e17).episode_days(Day(0));
        assert_eq!(days.len(), 100);
        assert_eq!(days.last(), Some(&(Day(99), Suspension::Full)));
    }

    #[test]
    fn fractional_hours_round_up() {
        let days = generator(1.0, 0.1).episode_days(Day(0));
        assert_eq!(days, [(Day(0), Suspension::Partial(1))]);
    }

    #[test]
    fn certain_breakdown_hits_every_linac_within_week() {
        let pool = CapacityPool::new(3, 40, 8);
        let mut source = generator(1.0, 2.0);
        let mut rng = SimRng::new(5);
        let events = source.wake(Day(10), &pool, &mut rng);
        assert_eq!(events.len(), 3);
        for e in &events {
            assert!(e.day >= Day(10) && e.day < Day(15));
            assert!(e.starts_episode());
            assert!(matches!(e.target, DisruptionTarget::Linac(_)));
        }
    }

    #[test]
    fn zero_probability_never_fires() {
        let pool = CapacityPool::new(4, 40, 8);
        let mut source = generator(0.0, 2.0);
        assert_eq!(source.first_wake(), None);
        let mut rng = SimRng::new(5);
        assert!(source.wake(Day(0), &pool, &mut rng).is_empty());
    }

    #[test]
    fn zero_duration_is_inactive() {
        assert_eq!(generator(0.5, 0.0).first_wake(), None);
        assert!(generator(0.5, 0.0).episode_days(Day(0)).is_empty());
    }

    #[test]
    fn wakes_weekly() {
        let source = generator(0.5, 2.0);
        assert_eq!(source.first_wake(), Some(Day(0)));
        assert_eq!(source.next_wake(Day(0)), Some(Day(5)));
        assert_eq!(source.next_wake(Day(7)), Some(Day(10)));
    }
}

#[cfg(test)]
mod closure_tests {
    use rtc_capacity::{CapacityPool, Suspension};
    use rtc_core::{ClosurePolicy, Day, SimRng};

    use crate::{ClosureGenerator, DisruptionGenerator, DisruptionTarget};

    #[test]
    fn every_fourth_week() {
        let source = ClosureGenerator::new(ClosurePolicy::default());
        assert_eq!(source.first_wake(), Some(Day(19)));
        assert_eq!(source.next_wake(Day(19)), Some(Day(39)));
        assert!(source.is_closure_day(Day(19)));
        assert!(source.is_closure_day(Day(39)));
        assert!(!source.is_closure_day(Day(18)));
        assert!(!source.is_closure_day(Day(24)));
    }

    #[test]
    fn closure_covers_all_linacs() {
        let mut source = ClosureGenerator::new(ClosurePolicy { interval_weeks: 1, weekday: 0 });
        let pool = CapacityPool::new(2, 8, 2);
        let mut rng = SimRng::new(0);
        let events = source.wake(Day(5), &pool, &mut rng);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, DisruptionTarget::AllLinacs);
        assert_eq!(events[0].suspension, Suspension::Full);
    }
}
