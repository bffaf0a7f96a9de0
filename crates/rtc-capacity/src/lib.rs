//! `rtc-capacity` — the pooled daily treatment capacity of the center.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`linac`]     | `Linac`, `Suspension`                                     |
//! | [`pool`]      | `CapacityPool` — overtime toggles, suspensions, totals    |
//! | [`allocator`] | `SlotAllocator`, `SlotAssignment` — one day's bindings    |
//!
//! # Slot model
//!
//! A slot-unit is one patient-hour on one LINAC on one day.  Each LINAC
//! offers `base_slots` regular slots plus `overtime_slots` when its overtime
//! flag is on.  Slots are numbered from 0; indices at or above `base_slots`
//! are overtime slots.  A suspension removes slots from the top of the range
//! for the current day only.

pub mod allocator;
pub mod linac;
pub mod pool;

#[cfg(test)]
mod tests;

pub use allocator::{SlotAllocator, SlotAssignment};
pub use linac::{Linac, Suspension};
pub use pool::CapacityPool;
