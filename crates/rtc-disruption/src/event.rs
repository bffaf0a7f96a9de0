//! Disruption event types.

use std::fmt;

use rtc_capacity::Suspension;
use rtc_core::{Day, LinacId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisruptionKind {
    Breakdown,
    Closure,
}

impl fmt::Display for DisruptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisruptionKind::Breakdown => "breakdown",
            DisruptionKind::Closure   => "closure",
        })
    }
}

/// Which machines an event takes out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisruptionTarget {
    Linac(LinacId),
    AllLinacs,
}

/// One day of one disruption episode.
///
/// A breakdown longer than a working day is split into one event per day it
/// covers; all of them share `start_day`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisruptionEvent {
    pub kind:       DisruptionKind,
    pub target:     DisruptionTarget,
    /// First day of the episode.
    pub start_day:  Day,
    /// The day this event applies to.
    pub day:        Day,
    pub suspension: Suspension,
}

impl DisruptionEvent {
    pub fn closure(day: Day) -> Self {
        Self {
            kind:       DisruptionKind::Closure,
            target:     DisruptionTarget::AllLinacs,
            start_day:  day,
            day,
            suspension: Suspension::Full,
        }
    }

    /// `true` for the first day of an episode.
    pub fn starts_episode(&self) -> bool {
        self.day == self.start_day
    }
}
