//! Deterministic center-wide closures.

use rtc_capacity::CapacityPool;
use rtc_core::{ClosurePolicy, DAYS_PER_WEEK, Day, SimRng};

use crate::{DisruptionEvent, DisruptionGenerator, DisruptionKind};

/// Closes the whole center on one working day every `interval_weeks`.
#[derive(Clone, Debug)]
pub struct ClosureGenerator {
    policy: ClosurePolicy,
}

impl ClosureGenerator {
    pub fn new(policy: ClosurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ClosurePolicy {
        self.policy
    }

    /// `true` if `day` is a closure day under this policy.
    pub fn is_closure_day(&self, day: Day) -> bool {
        self.policy.interval_weeks > 0
            && day.weekday() == self.policy.weekday
            && (day.week() + 1) % self.policy.interval_weeks == 0
    }
}

impl DisruptionGenerator for ClosureGenerator {
    fn kind(&self) -> DisruptionKind {
        DisruptionKind::Closure
    }

    fn first_wake(&self) -> Option<Day> {
        let week = self.policy.interval_weeks.checked_sub(1)?;
        Some(Day::week_start(week) + self.policy.weekday)
    }

    fn wake(&mut self, day: Day, _pool: &CapacityPool, _rng: &mut SimRng) -> Vec<DisruptionEvent> {
        debug_assert!(self.is_closure_day(day));
        log::info!("{day}: center closed");
        vec![DisruptionEvent::closure(day)]
    }

    fn next_wake(&self, day: Day) -> Option<Day> {
        Some(day + self.policy.interval_weeks * DAYS_PER_WEEK)
    }
}
