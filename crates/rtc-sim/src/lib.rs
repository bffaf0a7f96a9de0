//! `rtc-sim` — the day loop for the radiotherapy center simulator.
//!
//! # Day loop
//!
//! ```text
//! for day in 0..sim_weeks * 5:
//!   ① Generators  — breakdown / closure generators due today schedule
//!                   events into the disruption calendar.
//!   ② Disruptions — today's calendar entry suspends LINACs and interrupts
//!                   the treatment processes bound to them.
//!   ③ Overtime    — backlog > threshold → one more LINAC on overtime;
//!                   otherwise one fewer.
//!   ④ Scheduler   — continuing processes are booked first, then the
//!                   backlog is admitted FIFO into the remaining slot-units.
//!   ⑤ Treatment   — every booked process consumes its slot-unit.
//!   ⑥ Intake      — week boundaries only: a new batch joins the backlog.
//!   → one MetricsSnapshot
//! ```
//!
//! Each step is a [`Phase`] resumed from a day-indexed [`WakeQueue`]; the
//! derived ordering of `Phase` is the order above, so capacity and
//! interruption state are settled before any admission or session.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rtc_core::CenterConfig;
//! use rtc_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(CenterConfig::default()).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("treated {}", summary.patients_treated);
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod overtime;
pub mod phase;
pub mod scheduler;
pub mod sim;
pub mod wake_queue;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsSnapshot, RunSummary, WaitStats};
pub use observer::{MetricsRecorder, NoopObserver, SimObserver};
pub use overtime::{OvertimeChange, OvertimeController};
pub use phase::Phase;
pub use scheduler::{ScheduleReport, TreatmentScheduler};
pub use sim::Sim;
pub use wake_queue::WakeQueue;
