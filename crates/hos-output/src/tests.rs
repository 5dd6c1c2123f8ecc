//! Integration tests for hos-output.

#[cfg(test)]
mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};

    use hos_route::{RouteLeg, RouteSummary};
    use hos_sim::TripRequest;

    pub fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    pub fn nyc_chicago() -> RouteSummary {
        RouteSummary::from_legs(
            vec![RouteLeg { distance_m: 1_931_000.0, duration_s: 72_000.0 }],
            vec![],
        )
    }

    pub fn request() -> TripRequest {
        TripRequest {
            current_location: "New York, NY".to_owned(),
            pickup_location:  "New York, NY".to_owned(),
            dropoff_location: "Chicago, IL".to_owned(),
            cycle_hours_used: 10.5,
        }
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use hos_core::{DutyEvent, DutyStatus, Remark};

    use super::fixtures::*;
    use crate::csv::CsvWriter;
    use crate::row::{DaySummaryRow, DutyEventRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn event_row(day: u32, hour: u32, status: DutyStatus, hours: f64, remark: Remark) -> DutyEventRow {
        let start = at(1 + day, hour, 0);
        DutyEventRow::new(7, day, start.date(), &DutyEvent::new(status, start, hours), remark)
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("duty_events.csv").exists());
        assert!(dir.path().join("day_summaries.csv").exists());
        assert!(dir.path().join("trips.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "duty_events.csv"),
            ["trip_id", "day", "date", "status", "start_time", "duration_hours", "remark"]
        );
        assert_eq!(headers(&dir, "day_summaries.csv")[3], "driving_hours");
        assert_eq!(headers(&dir, "trips.csv").len(), 11);
    }

    #[test]
    fn csv_event_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[
            event_row(0, 0, DutyStatus::OnDuty, 1.0, Remark::Pickup),
            event_row(1, 0, DutyStatus::SleeperBerth, 10.0, Remark::Rest),
        ])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "duty_events.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "7");                   // trip_id
        assert_eq!(&rows[0][3], "on_duty");
        assert_eq!(&rows[0][4], "2024-01-01T00:00:00");
        assert_eq!(&rows[0][6], "pickup");
        assert_eq!(&rows[1][2], "2024-01-02");
        assert_eq!(&rows[1][3], "sleeper_berth");
        assert_eq!(&rows[1][5], "10");
    }

    #[test]
    fn csv_day_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_day_summaries(&[DaySummaryRow {
            trip_id:             1,
            day:                 0,
            date:                at(1, 0, 0).date(),
            driving_hours:       11.0,
            on_duty_hours:       3.0,
            off_duty_hours:      0.0,
            sleeper_berth_hours: 0.0,
            event_count:         4,
        }])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "day_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "2024-01-01");
        assert_eq!(&rows[0][3], "11");
        assert_eq!(&rows[0][7], "4");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_events(&[]).unwrap();
        w.write_day_summaries(&[]).unwrap();
    }

    #[test]
    fn integration_csv() {
        use hos_sim::{SimulationResult, Simulator};

        use crate::observer::TripOutputObserver;

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TripOutputObserver::new(writer, 3, &request(), at(1, 0, 0));
        let result = Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
            .unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let events = records(&dir, "duty_events.csv");
        assert_eq!(events.len(), 9);
        let remarks: Vec<&str> = events.iter().map(|r| &r[6]).collect();
        assert_eq!(remarks.iter().filter(|&&r| r == "fueling").count(), 1);
        assert_eq!(remarks.iter().filter(|&&r| r == "dropoff").count(), 2);

        let summaries = records(&dir, "day_summaries.csv");
        assert_eq!(summaries.len(), 2);
        assert_eq!(&summaries[1][7], "5");

        let trips = records(&dir, "trips.csv");
        assert_eq!(trips.len(), 1);
        assert_eq!(&trips[0][0], "3");
        assert_eq!(&trips[0][3], "Chicago, IL");
        assert_eq!(&trips[0][7], "2");
        assert_eq!(&trips[0][10], "2024-01-01T00:00:00");

        let days: serde_json::Value = serde_json::from_str(&trips[0][9]).unwrap();
        assert_eq!(days[1]["events"][0]["type"], "sleeper_berth");
        let route: serde_json::Value = serde_json::from_str(&trips[0][8]).unwrap();
        assert_eq!(route["distance"], 1_931_000.0);

        // The JSON columns carry the full result.
        let back = SimulationResult {
            route: serde_json::from_value(route).unwrap(),
            days:  serde_json::from_value(days).unwrap(),
        };
        assert_eq!(back, result);
    }

    #[test]
    fn csv_appends_across_runs() {
        use hos_sim::Simulator;

        use crate::observer::TripOutputObserver;

        let dir = tmp();
        for trip_id in [1, 2] {
            let writer = CsvWriter::new(dir.path()).unwrap();
            let mut obs = TripOutputObserver::new(writer, trip_id, &request(), at(1, 0, 0));
            Simulator::default()
                .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
                .unwrap();
            assert!(obs.take_error().is_none());
        }

        let trips = records(&dir, "trips.csv");
        assert_eq!(trips.len(), 2);
        assert_eq!(&trips[0][0], "1");
        assert_eq!(&trips[1][0], "2");
        assert_eq!(records(&dir, "duty_events.csv").len(), 18);
        assert_eq!(records(&dir, "day_summaries.csv").len(), 4);

        let raw = std::fs::read_to_string(dir.path().join("duty_events.csv")).unwrap();
        assert_eq!(raw.lines().filter(|l| l.starts_with("trip_id,")).count(), 1);
    }

    #[test]
    fn events_keep_the_log_date_past_midnight() {
        use hos_sim::Simulator;

        use crate::observer::TripOutputObserver;

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = TripOutputObserver::new(writer, 1, &request(), at(1, 15, 0));
        Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 15, 0), &mut obs)
            .unwrap();

        // Day 0 runs 15:00 → 05:00; its residual block starts on Jan 2.
        let events = records(&dir, "duty_events.csv");
        let residual = &events[2];
        assert_eq!(&residual[1], "0");
        assert_eq!(&residual[2], "2024-01-01");
        assert_eq!(&residual[4], "2024-01-02T03:00:00");
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use hos_sim::Simulator;

    use super::fixtures::*;
    use crate::observer::TripOutputObserver;
    use crate::row::{DaySummaryRow, DutyEventRow, TripRecord};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    /// Collects rows in memory; optionally fails event writes.
    #[derive(Default)]
    struct MemoryWriter {
        trips:       Vec<TripRecord>,
        events:      Vec<DutyEventRow>,
        summaries:   Vec<DaySummaryRow>,
        finishes:    usize,
        fail_events: bool,
    }

    impl OutputWriter for MemoryWriter {
        fn write_trip(&mut self, record: &TripRecord) -> OutputResult<()> {
            self.trips.push(record.clone());
            Ok(())
        }

        fn write_events(&mut self, rows: &[DutyEventRow]) -> OutputResult<()> {
            if self.fail_events {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.events.extend_from_slice(rows);
            Ok(())
        }

        fn write_day_summaries(&mut self, rows: &[DaySummaryRow]) -> OutputResult<()> {
            self.summaries.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    #[test]
    fn rows_written_at_sim_end() {
        let mut obs = TripOutputObserver::new(MemoryWriter::default(), 9, &request(), at(1, 0, 0));
        Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
            .unwrap();
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.trips.len(), 1);
        assert_eq!(w.trips[0].day_count, 2);
        assert!((w.trips[0].driving_hours - 20.0).abs() < 1e-9);
        assert!((w.trips[0].distance_miles - 1_199.87).abs() < 0.01);
        assert_eq!(w.events.len(), 9);
        assert!(w.events.iter().all(|e| e.trip_id == 9));
        assert_eq!(w.summaries.len(), 2);
        assert_eq!(w.summaries[0].driving_hours, 11.0);
        assert_eq!(w.summaries[1].sleeper_berth_hours, 10.0);
        assert_eq!(w.finishes, 1);
    }

    #[test]
    fn failed_simulation_writes_nothing() {
        let mut obs = TripOutputObserver::new(MemoryWriter::default(), 1, &request(), at(1, 0, 0));
        assert!(Simulator::default()
            .run_observed(nyc_chicago(), 69.5, at(1, 0, 0), &mut obs)
            .is_err());
        let w = obs.into_writer();
        assert!(w.trips.is_empty());
        assert!(w.events.is_empty());
        assert_eq!(w.finishes, 0);
    }

    #[test]
    fn write_error_is_stored_and_finish_still_runs() {
        let writer = MemoryWriter { fail_events: true, ..MemoryWriter::default() };
        let mut obs = TripOutputObserver::new(writer, 1, &request(), at(1, 0, 0));
        Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
            .unwrap();

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none(), "error is taken once");
        assert_eq!(obs.into_writer().finishes, 1);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use hos_sim::Simulator;

    use super::fixtures::*;
    use crate::observer::TripOutputObserver;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn run_trip(dir: &TempDir, trip_id: u64) {
        let writer = SqliteWriter::new(dir.path()).unwrap();
        let mut obs = TripOutputObserver::new(writer, trip_id, &request(), at(1, 0, 0));
        Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
            .unwrap();
        assert!(obs.take_error().is_none());
    }

    fn count(dir: &TempDir, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("trips.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("trips.db").exists());
    }

    #[test]
    fn sqlite_trip_rows() {
        let dir = tmp();
        run_trip(&dir, 1);
        assert_eq!(count(&dir, "trips"), 1);
        assert_eq!(count(&dir, "duty_events"), 9);
        assert_eq!(count(&dir, "day_summaries"), 2);

        let conn = rusqlite::Connection::open(dir.path().join("trips.db")).unwrap();
        let (dropoff, days, logs): (String, i64, String) = conn.query_row(
            "SELECT dropoff_location, day_count, eld_logs_data FROM trips WHERE trip_id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        ).unwrap();
        assert_eq!(dropoff, "Chicago, IL");
        assert_eq!(days, 2);
        let logs: serde_json::Value = serde_json::from_str(&logs).unwrap();
        assert_eq!(logs.as_array().unwrap().len(), 2);
    }

    #[test]
    fn sqlite_status_and_remark_as_text() {
        let dir = tmp();
        run_trip(&dir, 1);

        let conn = rusqlite::Connection::open(dir.path().join("trips.db")).unwrap();
        let (status, start): (String, String) = conn.query_row(
            "SELECT status, start_time FROM duty_events WHERE remark = 'fueling'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        ).unwrap();
        assert_eq!(status, "on_duty");
        assert_eq!(start, "2024-01-02T19:00:00");
    }

    #[test]
    fn sqlite_rerun_replaces_rows() {
        let dir = tmp();
        run_trip(&dir, 4);
        run_trip(&dir, 4);
        assert_eq!(count(&dir, "trips"), 1);
        assert_eq!(count(&dir, "duty_events"), 9);
        assert_eq!(count(&dir, "day_summaries"), 2);
    }

    fn run_trip_expecting_error(dir: &TempDir, trip_id: u64) {
        let writer = SqliteWriter::new(dir.path()).unwrap();
        let mut obs = TripOutputObserver::new(writer, trip_id, &request(), at(1, 0, 0));
        Simulator::default()
            .run_observed(nyc_chicago(), 10.5, at(1, 0, 0), &mut obs)
            .unwrap();
        assert!(matches!(obs.take_error(), Some(crate::OutputError::Sqlite(_))));
    }

    #[test]
    fn sqlite_rejected_event_leaves_no_trip() {
        let dir = tmp();
        {
            let conn = rusqlite::Connection::open(dir.path().join("trips.db")).unwrap();
            conn.execute_batch(
                "CREATE TABLE duty_events (
                     trip_id        INTEGER NOT NULL,
                     day            INTEGER NOT NULL,
                     date           TEXT    NOT NULL,
                     status         TEXT    NOT NULL CHECK (status = 'none'),
                     start_time     TEXT    NOT NULL,
                     duration_hours REAL    NOT NULL,
                     remark         TEXT    NOT NULL
                 );",
            ).unwrap();
        }

        run_trip_expecting_error(&dir, 2);
        assert_eq!(count(&dir, "trips"), 0);
        assert_eq!(count(&dir, "duty_events"), 0);
        assert_eq!(count(&dir, "day_summaries"), 0);
    }

    #[test]
    fn sqlite_failed_rerun_keeps_previous_rows() {
        let dir = tmp();
        run_trip(&dir, 5);
        {
            let conn = rusqlite::Connection::open(dir.path().join("trips.db")).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_summaries BEFORE INSERT ON day_summaries
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            ).unwrap();
        }

        run_trip_expecting_error(&dir, 5);
        assert_eq!(count(&dir, "trips"), 1);
        assert_eq!(count(&dir, "duty_events"), 9);
        assert_eq!(count(&dir, "day_summaries"), 2);
    }
}
