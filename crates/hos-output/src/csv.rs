//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `duty_events.csv`
//! - `day_summaries.csv`
//! - `trips.csv`
//!
//! Files are appended to across runs; the header row is written only when a
//! file is first created (or found empty).

use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, DutyEventRow, OutputResult, TIMESTAMP_FORMAT, TripRecord};

/// Writes trip output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    trips:     Writer<File>,
    finished:  bool,
}

const EVENT_HEADER: [&str; 7] = [
    "trip_id", "day", "date", "status", "start_time", "duration_hours", "remark",
];

const SUMMARY_HEADER: [&str; 8] = [
    "trip_id", "day", "date", "driving_hours", "on_duty_hours", "off_duty_hours",
    "sleeper_berth_hours", "event_count",
];

const TRIP_HEADER: [&str; 11] = [
    "trip_id", "current_location", "pickup_location", "dropoff_location",
    "cycle_hours_used", "distance_miles", "driving_hours", "day_count",
    "route_data", "eld_logs_data", "created_at",
];

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` for appending.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            events:    open_append(&dir.join("duty_events.csv"), &EVENT_HEADER)?,
            summaries: open_append(&dir.join("day_summaries.csv"), &SUMMARY_HEADER)?,
            trips:     open_append(&dir.join("trips.csv"), &TRIP_HEADER)?,
            finished:  false,
        })
    }
}

fn open_append(path: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let fresh = file.metadata()?.len() == 0;
    let mut writer = Writer::from_writer(file);
    if fresh {
        writer.write_record(header)?;
        writer.flush()?;
    }
    Ok(writer)
}

impl OutputWriter for CsvWriter {
    fn write_trip(&mut self, record: &TripRecord) -> OutputResult<()> {
        self.trips.write_record(&[
            record.trip_id.to_string(),
            record.current_location.clone(),
            record.pickup_location.clone(),
            record.dropoff_location.clone(),
            record.cycle_hours_used.to_string(),
            record.distance_miles.to_string(),
            record.driving_hours.to_string(),
            record.day_count.to_string(),
            record.route_json.clone(),
            record.eld_logs_json.clone(),
            record.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[DutyEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.trip_id.to_string(),
                row.day.to_string(),
                row.date.to_string(),
                row.status.to_string(),
                row.start_time.format(TIMESTAMP_FORMAT).to_string(),
                row.duration_hours.to_string(),
                row.remark.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_day_summaries(&mut self, rows: &[DaySummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.trip_id.to_string(),
                row.day.to_string(),
                row.date.to_string(),
                row.driving_hours.to_string(),
                row.on_duty_hours.to_string(),
                row.off_duty_hours.to_string(),
                row.sleeper_berth_hours.to_string(),
                row.event_count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        self.trips.flush()?;
        Ok(())
    }
}
