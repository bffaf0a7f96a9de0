//! The `DisruptionGenerator` trait — the extension point for new disruption
//! sources.

use rtc_capacity::CapacityPool;
use rtc_core::{Day, SimRng};

use crate::{DisruptionEvent, DisruptionKind};

/// A process that wakes on its own cadence and schedules disruptions.
///
/// # Contract
///
/// - Must be deterministic given the same `rng` state.
/// - Must not block or perform I/O.
/// - Events returned from `wake` may lie in the future (multi-day
///   breakdowns); the engine stores them in the calendar until their day.
pub trait DisruptionGenerator {
    fn kind(&self) -> DisruptionKind;

    /// First day the generator must be woken, or `None` if it never fires.
    fn first_wake(&self) -> Option<Day>;

    /// Called on each wake day.  Returns the events to schedule.
    fn wake(&mut self, day: Day, pool: &CapacityPool, rng: &mut SimRng) -> Vec<DisruptionEvent>;

    /// Next wake day after a wake on `day`.
    fn next_wake(&self, day: Day) -> Option<Day>;
}
