//! `hos-output` — duty-log and trip-record writers for the hos trip planner.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                        |
//! |-----------|---------|------------------------------------------------------|
//! | *(none)*  | CSV     | `duty_events.csv`, `day_summaries.csv`, `trips.csv`  |
//! | `sqlite`  | SQLite  | `trips.db`                                           |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`TripOutputObserver`], which implements `hos_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hos_output::{CsvWriter, TripOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TripOutputObserver::new(writer, 1, &request, created_at);
//! let result = planner.plan_observed(&request, start, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TripOutputObserver;
pub use row::{DaySummaryRow, DutyEventRow, TIMESTAMP_FORMAT, TripRecord};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
