//! `rtc-core` — foundational types for the radiotherapy center simulator.
//!
//! Every other `rtc-*` crate depends on this one.  It has no `rtc-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `PatientId`, `LinacId`                                    |
//! | [`time`]     | `Day`, `SimClock`, `DAYS_PER_WEEK`                        |
//! | [`rng`]      | `SimRng` (seedable, single-threaded)                      |
//! | [`config`]   | `CenterConfig`, `CaseMix`, `ClosurePolicy`                |
//! | [`error`]    | `RtcError`, `RtcResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Day` and config.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CASE_MIX_TOLERANCE, CaseMix, CenterConfig, ClosurePolicy, MAX_COURSE_WEEKS};
pub use error::{RtcError, RtcResult};
pub use ids::{LinacId, PatientId};
pub use rng::SimRng;
pub use time::{DAYS_PER_WEEK, Day, SimClock};
