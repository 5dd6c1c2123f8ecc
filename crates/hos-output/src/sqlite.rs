//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trips.db` file in the configured output directory with
//! three tables: `trips`, `duty_events` and `day_summaries`.  Writing a trip
//! record clears earlier event and summary rows under the same trip id, and
//! a whole trip lands in a single transaction.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, DutyEventRow, OutputResult, TIMESTAMP_FORMAT, TripRecord};

/// Writes trip output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trips.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trips.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS trips (
                 trip_id          INTEGER PRIMARY KEY,
                 current_location TEXT    NOT NULL,
                 pickup_location  TEXT    NOT NULL,
                 dropoff_location TEXT    NOT NULL,
                 cycle_hours_used REAL    NOT NULL,
                 distance_miles   REAL    NOT NULL,
                 driving_hours    REAL    NOT NULL,
                 day_count        INTEGER NOT NULL,
                 route_data       TEXT    NOT NULL,
                 eld_logs_data    TEXT    NOT NULL,
                 created_at       TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS duty_events (
                 trip_id        INTEGER NOT NULL,
                 day            INTEGER NOT NULL,
                 date           TEXT    NOT NULL,
                 status         TEXT    NOT NULL,
                 start_time     TEXT    NOT NULL,
                 duration_hours REAL    NOT NULL,
                 remark         TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS day_summaries (
                 trip_id             INTEGER NOT NULL,
                 day                 INTEGER NOT NULL,
                 date                TEXT    NOT NULL,
                 driving_hours       REAL    NOT NULL,
                 on_duty_hours       REAL    NOT NULL,
                 off_duty_hours      REAL    NOT NULL,
                 sleeper_berth_hours REAL    NOT NULL,
                 event_count         INTEGER NOT NULL,
                 PRIMARY KEY (trip_id, day)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_trip(&mut self, record: &TripRecord) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_trip(&tx, record)?;
        tx.commit()?;
        Ok(())
    }

    fn write_events(&mut self, rows: &[DutyEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        insert_events(&tx, rows)?;
        tx.commit()?;
        Ok(())
    }

    fn write_day_summaries(&mut self, rows: &[DaySummaryRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        insert_summaries(&tx, rows)?;
        tx.commit()?;
        Ok(())
    }

    /// One transaction for the whole trip; any failed insert rolls back the
    /// trip row and the cleared rows with it.
    fn write_trip_rows(
        &mut self,
        record:    &TripRecord,
        events:    &[DutyEventRow],
        summaries: &[DaySummaryRow],
    ) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_trip(&tx, record)?;
        insert_events(&tx, events)?;
        insert_summaries(&tx, summaries)?;
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

// ── Statements ────────────────────────────────────────────────────────────────

/// Replace the trip row and clear earlier rows filed under its id.
fn insert_trip(conn: &Connection, record: &TripRecord) -> rusqlite::Result<()> {
    for table in ["duty_events", "day_summaries"] {
        conn.execute(
            &format!("DELETE FROM {table} WHERE trip_id = ?1"),
            rusqlite::params![record.trip_id as i64],
        )?;
    }
    conn.execute(
        "INSERT OR REPLACE INTO trips \
         (trip_id, current_location, pickup_location, dropoff_location, cycle_hours_used, \
          distance_miles, driving_hours, day_count, route_data, eld_logs_data, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            record.trip_id as i64,
            record.current_location,
            record.pickup_location,
            record.dropoff_location,
            record.cycle_hours_used,
            record.distance_miles,
            record.driving_hours,
            record.day_count,
            record.route_json,
            record.eld_logs_json,
            record.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

fn insert_events(conn: &Connection, rows: &[DutyEventRow]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO duty_events \
         (trip_id, day, date, status, start_time, duration_hours, remark) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for row in rows {
        stmt.execute(rusqlite::params![
            row.trip_id as i64,
            row.day,
            row.date.to_string(),
            row.status.as_str(),
            row.start_time.format(TIMESTAMP_FORMAT).to_string(),
            row.duration_hours,
            row.remark.as_str(),
        ])?;
    }
    Ok(())
}

fn insert_summaries(conn: &Connection, rows: &[DaySummaryRow]) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO day_summaries \
         (trip_id, day, date, driving_hours, on_duty_hours, off_duty_hours, \
          sleeper_berth_hours, event_count) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for row in rows {
        stmt.execute(rusqlite::params![
            row.trip_id as i64,
            row.day,
            row.date.to_string(),
            row.driving_hours,
            row.on_duty_hours,
            row.off_duty_hours,
            row.sleeper_berth_hours,
            row.event_count,
        ])?;
    }
    Ok(())
}
