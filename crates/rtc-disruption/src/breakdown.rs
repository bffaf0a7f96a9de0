//! Stochastic LINAC breakdowns.
//!
//! At the start of every week each LINAC independently breaks down with
//! probability `weekly_probability`.  A breakdown starts on a uniformly drawn
//! working day of that week and lasts `duration_hours` of machine time,
//! consumed at most `day_hours` per working day:
//!
//! ```text
//! 2 h on a 10 h day   → one day, Partial(ceil(2 × patients_per_hour))
//! 24 h on a 10 h day  → Full, Full, Partial(ceil(4 × patients_per_hour))
//! ```
//!
//! Days at or past the run horizon are never generated.

use rtc_capacity::{CapacityPool, Suspension};
use rtc_core::{CenterConfig, DAYS_PER_WEEK, Day, SimRng};

use crate::{DisruptionEvent, DisruptionGenerator, DisruptionKind, DisruptionTarget};

#[derive(Clone, Debug)]
pub struct BreakdownGenerator {
    pub weekly_probability: f64,
    pub duration_hours:     f64,
    pub day_hours:          f64,
    pub patients_per_hour:  f64,
    /// First day not simulated; episode days from here on are dropped.
    pub horizon:            Day,
}

impl BreakdownGenerator {
    pub fn from_config(config: &CenterConfig) -> Self {
        Self {
            weekly_probability: config.weekly_breakdown_probability,
            duration_hours:     config.breakdown_duration_hours,
            day_hours:          config.treatment_day_hours,
            patients_per_hour:  config.patients_per_hour_per_linac,
            horizon:            Day(config.horizon_days()),
        }
    }

    /// `false` when no breakdown can ever happen.
    pub fn is_active(&self) -> bool {
        self.weekly_probability > 0.0 && self.duration_hours > 0.0
    }

    /// Split one breakdown into per-day suspensions.
    ///
    /// The episode is `floor(duration / day_hours)` full days plus one partial
    /// day for the remainder, cut off at `horizon`.
    pub fn episode_days(&self, start: Day) -> Vec<(Day, Suspension)> {
        if self.day_hours <= 0.0 || !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Vec::new();
        }
        // Saturating cast; `take` below bounds the walk anyway.
        let full_days = (self.duration_hours / self.day_hours).floor() as u64;
        let remainder = self.duration_hours % self.day_hours;
        let partial = (remainder > 0.0)
            .then(|| Suspension::Partial((remainder * self.patients_per_hour).ceil() as u32));
        let days_left = self.horizon.0.saturating_sub(start.0);

        (0..full_days)
            .map(|_| Suspension::Full)
            .chain(partial)
            .take(usize::try_from(days_left).unwrap_or(usize::MAX))
            .enumerate()
            .map(|(i, suspension)| (start + i as u64, suspension))
            .collect()
    }
}

impl DisruptionGenerator for BreakdownGenerator {
    fn kind(&self) -> DisruptionKind {
        DisruptionKind::Breakdown
    }

    fn first_wake(&self) -> Option<Day> {
        self.is_active().then_some(Day::ZERO)
    }

    fn wake(&mut self, day: Day, pool: &CapacityPool, rng: &mut SimRng) -> Vec<DisruptionEvent> {
        let week_start = Day::week_start(day.week());
        let mut events = Vec::new();
        for linac in pool.linacs() {
            if !rng.gen_bool(self.weekly_probability) {
                continue;
            }
            let start = week_start + rng.gen_range(0..DAYS_PER_WEEK);
            log::info!("{day}: {} scheduled to break down on {start}", linac.id);
            events.extend(self.episode_days(start).into_iter().map(|(d, suspension)| {
                DisruptionEvent {
                    kind:      DisruptionKind::Breakdown,
                    target:    DisruptionTarget::Linac(linac.id),
                    start_day: start,
                    day:       d,
                    suspension,
                }
            }));
        }
        events
    }

    fn next_wake(&self, day: Day) -> Option<Day> {
        Some(Day::week_start(day.week() + 1))
    }
}
