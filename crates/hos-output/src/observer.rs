//! `TripOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use chrono::{NaiveDate, NaiveDateTime};

use hos_core::{DayLog, DutyEvent, Remark};
use hos_sim::{SimObserver, SimulationResult, TripRequest};

use crate::row::{DaySummaryRow, DutyEventRow, TripRecord};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records one trip's duty events, day summaries, and
/// trip record to any [`OutputWriter`] backend.
///
/// Rows are buffered while the simulation runs and written in one go from
/// `on_sim_end`, so a failed simulation leaves nothing behind.  Errors from
/// the writer are stored internally because `SimObserver` methods have no
/// return value; check them with [`take_error`][Self::take_error].
pub struct TripOutputObserver<W: OutputWriter> {
    writer:     W,
    trip_id:    u64,
    request:    TripRequest,
    created_at: NaiveDateTime,
    /// Log date of the day in progress; events may spill past midnight.
    day_date:   Option<NaiveDate>,
    events:     Vec<DutyEventRow>,
    summaries:  Vec<DaySummaryRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TripOutputObserver<W> {
    /// Create an observer that files rows under `trip_id`, stamping the trip
    /// record with `created_at`.
    pub fn new(writer: W, trip_id: u64, request: &TripRequest, created_at: NaiveDateTime) -> Self {
        Self {
            writer,
            trip_id,
            request: request.clone(),
            created_at,
            day_date:   None,
            events:     Vec::new(),
            summaries:  Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_trip(&mut self, result: &SimulationResult) -> OutputResult<()> {
        let record = TripRecord::new(self.trip_id, &self.request, result, self.created_at)?;
        self.writer
            .write_trip_rows(&record, &self.events, &self.summaries)?;
        self.events.clear();
        self.summaries.clear();
        Ok(())
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for TripOutputObserver<W> {
    fn on_day_start(&mut self, _day: usize, date: NaiveDate) {
        self.day_date = Some(date);
    }

    fn on_event(&mut self, day: usize, event: &DutyEvent, remark: Remark) {
        let date = self.day_date.unwrap_or_else(|| event.start_time.date());
        self.events
            .push(DutyEventRow::new(self.trip_id, day as u32, date, event, remark));
    }

    fn on_day_end(&mut self, day: usize, log: &DayLog) {
        self.summaries
            .push(DaySummaryRow::from_log(self.trip_id, day as u32, log));
    }

    fn on_sim_end(&mut self, result: &SimulationResult) {
        let written = self.flush_trip(result);
        self.store_err(written);
        let finished = self.writer.finish();
        self.store_err(finished);
    }
}
