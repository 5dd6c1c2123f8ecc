//! `hos-core` — foundational types for the hours-of-service trip planner.
//!
//! This crate is a dependency of every other `hos-*` crate.  It has no
//! `hos-*` dependencies and minimal external ones (`chrono` for calendar
//! arithmetic and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`geo`]     | `Coordinate`, haversine distance                         |
//! | [`duty`]    | `DutyStatus` enum                                        |
//! | [`eld`]     | `DutyEvent`, `DayLog`, `Remark`: the per-day duty log    |
//! | [`rules`]   | `HosRules`, `DropoffPlacement`, default rule constants   |
//! | [`time`]    | `TripClock`, fractional-hour ⇄ `Duration` helpers        |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod duty;
pub mod eld;
pub mod error;
pub mod geo;
pub mod rules;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use duty::DutyStatus;
pub use eld::{DayLog, DutyEvent, Remark};
pub use error::{CoreError, CoreResult};
pub use geo::Coordinate;
pub use rules::{DropoffPlacement, HosRules};
pub use time::TripClock;
