//! `rtc-patient` — patients and the work they need.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`patient`]   | `Patient`, `PatientState`                                    |
//! | [`backlog`]   | `Backlog` — FIFO queue of waiting patients                   |
//! | [`process`]   | `TreatmentProcess`, `Booking`, `SessionOutcome`              |
//! | [`intake`]    | `PatientIntake` — weekly batches with case-mix sampling      |
//!
//! # Ownership
//!
//! A `Patient` value lives in exactly one place: the `Backlog` while
//! waiting, a `TreatmentProcess` while in treatment, and the simulation's
//! completed list once done.  Moving the value between those containers is
//! the state transition.

pub mod backlog;
pub mod intake;
pub mod patient;
pub mod process;


pub use backlog::Backlog;
pub use intake::PatientIntake;
pub use patient::{Patient, PatientState};
pub use process::{Booking, SessionOutcome, TreatmentProcess};
