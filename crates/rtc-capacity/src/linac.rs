//! A single treatment machine.

use rtc_core::LinacId;

/// How much of a LINAC's day a disruption removes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suspension {
    /// The machine offers nothing today.
    Full,
    /// The machine loses this many slot-units today.
    Partial(u32),
}

impl Suspension {
    /// Collapse two suspensions of the same LINAC on the same day.
    ///
    /// Overlaps never add up: `Full` wins, two partial losses keep the larger.
    pub fn merge(self, other: Suspension) -> Suspension {
        match (self, other) {
            (Suspension::Full, _) | (_, Suspension::Full) => Suspension::Full,
            (Suspension::Partial(a), Suspension::Partial(b)) => Suspension::Partial(a.max(b)),
        }
    }

    /// Slot-units lost out of `offered`.
    pub fn lost_of(self, offered: u32) -> u32 {
        match self {
            Suspension::Full => offered,
            Suspension::Partial(n) => n.min(offered),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Linac {
    pub id: LinacId,
    /// Regular slot-units per day.  Fixed for the run.
    pub base_slots: u32,
    /// Slot-units added while `overtime_enabled`.
    pub overtime_slots: u32,
    pub overtime_enabled: bool,
    /// Today's suspension, cleared at the start of every disruption phase.
    pub suspension: Option<Suspension>,
}

impl Linac {
    pub fn new(id: LinacId, base_slots: u32, overtime_slots: u32) -> Self {
        Self {
            id,
            base_slots,
            overtime_slots,
            overtime_enabled: false,
            suspension: None,
        }
    }

    /// Slot-units on offer today before any suspension.
    #[inline]
    pub fn offered_slots(&self) -> u32 {
        if self.overtime_enabled {
            self.base_slots.saturating_add(self.overtime_slots)
        } else {
            self.base_slots
        }
    }

    #[inline]
    pub fn lost_slots(&self) -> u32 {
        self.suspension
            .map_or(0, |s| s.lost_of(self.offered_slots()))
    }

    /// Slot-units that can actually be used today.
    #[inline]
    pub fn available_slots(&self) -> u32 {
        self.offered_slots() - self.lost_slots()
    }

    /// `true` when slot index `slot` falls in the overtime range.
    #[inline]
    pub fn is_overtime_slot(&self, slot: u32) -> bool {
        slot >= self.base_slots
    }

    /// `true` when no slot is usable today because of a disruption.
    pub fn is_fully_suspended(&self) -> bool {
        self.suspension.is_some() && self.available_slots() == 0
    }
}
