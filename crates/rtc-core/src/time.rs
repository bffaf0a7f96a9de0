//! Simulation time model.
//!
//! # Design
//!
//! Time advances in whole working days.  A week is [`DAYS_PER_WEEK`] working
//! days; weekends are not modelled at all, so day 5 is the Monday of week 1.
//!
//!   week    = day / 5
//!   weekday = day % 5
//!
//! Using an integer day as the canonical unit keeps all schedule arithmetic
//! exact and comparisons O(1).

use std::fmt;

/// Working days per simulated week.
pub const DAYS_PER_WEEK: u64 = 5;

// ── Day ──────────────────────────────────────────────────────────────────────

/// An absolute simulated working-day counter, starting at `Day(0)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u64);

impl Day {
    pub const ZERO: Day = Day(0);

    /// First day of week `week`.
    #[inline]
    pub fn week_start(week: u64) -> Day {
        Day(week * DAYS_PER_WEEK)
    }

    /// Zero-based week this day belongs to.
    #[inline]
    pub fn week(self) -> u64 {
        self.0 / DAYS_PER_WEEK
    }

    /// Zero-based position within the week (0 = first working day).
    #[inline]
    pub fn weekday(self) -> u64 {
        self.0 % DAYS_PER_WEEK
    }

    /// `true` on the first working day of a week.
    #[inline]
    pub fn is_week_start(self) -> bool {
        self.weekday() == 0
    }

    /// Return the day `n` days after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Day {
        Day(self.0 + n)
    }

    /// Days elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Day) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Day {
    type Output = Day;
    #[inline]
    fn add(self, rhs: u64) -> Day {
        Day(self.0 + rhs)
    }
}

impl std::ops::Sub for Day {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Day) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current day and the fixed run horizon.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// The current day, advanced by `SimClock::advance()` once per step.
    pub current_day: Day,
    /// First day that is *not* simulated (exclusive upper bound).
    pub end_day: Day,
}

impl SimClock {
    /// A clock at day 0 running for `weeks` working weeks.
    pub fn new(weeks: u64) -> Self {
        Self {
            current_day: Day::ZERO,
            end_day:     Day::week_start(weeks),
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_day = self.current_day + 1;
    }

    /// `true` once the clock has reached the horizon.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_day >= self.end_day
    }

    /// Days left before the horizon.
    #[inline]
    pub fn remaining_days(&self) -> u64 {
        self.end_day.0.saturating_sub(self.current_day.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.current_day;
        write!(f, "{} (week {} day {})", day, day.week(), day.weekday())
    }
}
