//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DaySummaryRow, DutyEventRow, OutputResult, TripRecord};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`TripOutputObserver::take_error`][crate::TripOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one trip record.
    fn write_trip(&mut self, record: &TripRecord) -> OutputResult<()>;

    /// Write a batch of duty events.
    fn write_events(&mut self, rows: &[DutyEventRow]) -> OutputResult<()>;

    /// Write a batch of per-day summaries.
    fn write_day_summaries(&mut self, rows: &[DaySummaryRow]) -> OutputResult<()>;

    /// Write a finished trip: its record, then its events and summaries.
    ///
    /// Backends with transactions override this so a failure part-way
    /// leaves no trace of the trip.
    fn write_trip_rows(
        &mut self,
        record:    &TripRecord,
        events:    &[DutyEventRow],
        summaries: &[DaySummaryRow],
    ) -> OutputResult<()> {
        self.write_trip(record)?;
        self.write_events(events)?;
        self.write_day_summaries(summaries)
    }

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
