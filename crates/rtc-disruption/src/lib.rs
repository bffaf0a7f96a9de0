//! `rtc-disruption` — events that take capacity away and interrupt treatment.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`event`]     | `DisruptionEvent`, `DisruptionKind`, `DisruptionTarget`        |
//! | [`calendar`]  | `DisruptionCalendar`, `DayDisruptions`                         |
//! | [`generator`] | `DisruptionGenerator` trait                                    |
//! | [`breakdown`] | `BreakdownGenerator` — weekly per-LINAC draws                  |
//! | [`closure`]   | `ClosureGenerator` — one center-wide day every N weeks         |
//!
//! # Flow
//!
//! Generators wake on their own cadence and push one `DisruptionEvent` per
//! affected day into the calendar.  Every simulated day the engine takes that
//! day's entry, suspends the affected LINACs and interrupts the treatment
//! processes bound to them.  Events are discarded once delivered.

pub mod breakdown;
pub mod calendar;
pub mod closure;
pub mod event;
pub mod generator;

#[cfg(test)]
mod tests;

pub use breakdown::BreakdownGenerator;
pub use calendar::{DayDisruptions, DisruptionCalendar};
pub use closure::ClosureGenerator;
pub use event::{DisruptionEvent, DisruptionKind, DisruptionTarget};
pub use generator::DisruptionGenerator;
