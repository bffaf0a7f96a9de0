//! The engine's resumable processes.

use std::fmt;

/// A process the day loop can resume.
///
/// Variant order is the same-day resume order: the derived `Ord` is what
/// [`WakeQueue::drain_day`][crate::WakeQueue::drain_day] sorts by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Disruption generator at this index in the engine's generator list.
    Generator(usize),
    /// Apply today's calendar entry to the pool and the treatment processes.
    Disruptions,
    Overtime,
    Scheduler,
    Treatment,
    Intake,
}

impl Phase {
    /// Phases that re-arm themselves for the following day.
    pub const DAILY: [Phase; 4] = [
        Phase::Disruptions,
        Phase::Overtime,
        Phase::Scheduler,
        Phase::Treatment,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Generator(i) => write!(f, "generator#{i}"),
            Phase::Disruptions  => f.write_str("disruptions"),
            Phase::Overtime     => f.write_str("overtime"),
            Phase::Scheduler    => f.write_str("scheduler"),
            Phase::Treatment    => f.write_str("treatment"),
            Phase::Intake       => f.write_str("intake"),
        }
    }
}
