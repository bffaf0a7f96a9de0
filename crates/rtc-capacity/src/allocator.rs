//! One day's slot bookkeeping.
//!
//! A `SlotAllocator` is built from the pool after disruptions and overtime
//! have been settled for the day, then hands out slot-units until the day is
//! full.  Slots on a LINAC are filled from index 0 upwards, so regular slots
//! are always used before overtime slots.

use rtc_core::LinacId;

use crate::CapacityPool;

/// Where a patient is treated today.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotAssignment {
    pub linac:    LinacId,
    pub slot:     u32,
    /// `true` when the slot only exists because overtime is enabled.
    pub overtime: bool,
}

#[derive(Clone, Copy, Debug)]
struct LinacDay {
    available: u32,
    base:      u32,
    used:      u32,
}

#[derive(Clone, Debug)]
pub struct SlotAllocator {
    days: Vec<LinacDay>,
}

impl SlotAllocator {
    pub fn new(pool: &CapacityPool) -> Self {
        let days = pool
            .linacs()
            .iter()
            .map(|l| LinacDay {
                available: l.available_slots(),
                base:      l.base_slots,
                used:      0,
            })
            .collect();
        Self { days }
    }

    /// Unassigned slot-units left today.
    pub fn free_slots(&self) -> u32 {
        self.days
            .iter()
            .fold(0, |total: u32, d| total.saturating_add(d.available - d.used))
    }

    pub fn used_slots(&self) -> u32 {
        self.days.iter().fold(0, |total: u32, d| total.saturating_add(d.used))
    }

    /// Acquire one slot-unit, preferring `preferred` when it still has room.
    ///
    /// Returns `None` when the whole center is full for the day.
    pub fn assign(&mut self, preferred: Option<LinacId>) -> Option<SlotAssignment> {
        let index = preferred
            .map(LinacId::index)
            .filter(|&i| self.days.get(i).is_some_and(|d| d.used < d.available))
            .or_else(|| self.days.iter().position(|d| d.used < d.available))?;

        let day = &mut self.days[index];
        let slot = day.used;
        day.used += 1;
        Some(SlotAssignment {
            linac:    LinacId(index as u16),
            slot,
            overtime: slot >= day.base,
        })
    }
}
