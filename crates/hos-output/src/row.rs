//! Plain data row types written by output backends.

use chrono::{NaiveDate, NaiveDateTime};

use hos_core::{DayLog, DutyEvent, DutyStatus, Remark};
use hos_sim::{SimulationResult, TripRequest};

use crate::OutputResult;

/// Timestamp layout used in every backend; matches the JSON day logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One duty event, flattened with its trip and day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyEventRow {
    pub trip_id:        u64,
    pub day:            u32,
    pub date:           NaiveDate,
    pub status:         DutyStatus,
    pub start_time:     NaiveDateTime,
    pub duration_hours: f64,
    pub remark:         Remark,
}

impl DutyEventRow {
    pub fn new(trip_id: u64, day: u32, date: NaiveDate, event: &DutyEvent, remark: Remark) -> Self {
        Self {
            trip_id,
            day,
            date,
            status:         event.kind,
            start_time:     event.start_time,
            duration_hours: event.duration_hours,
            remark,
        }
    }
}

/// Hours per duty status for one day of a trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummaryRow {
    pub trip_id:             u64,
    pub day:                 u32,
    pub date:                NaiveDate,
    pub driving_hours:       f64,
    pub on_duty_hours:       f64,
    pub off_duty_hours:      f64,
    pub sleeper_berth_hours: f64,
    pub event_count:         u32,
}

impl DaySummaryRow {
    pub fn from_log(trip_id: u64, day: u32, log: &DayLog) -> Self {
        Self {
            trip_id,
            day,
            date:                log.date,
            driving_hours:       log.hours(DutyStatus::Driving),
            on_duty_hours:       log.hours(DutyStatus::OnDuty),
            off_duty_hours:      log.hours(DutyStatus::OffDuty),
            sleeper_berth_hours: log.hours(DutyStatus::SleeperBerth),
            event_count:         log.len() as u32,
        }
    }
}

/// A persisted trip: the request, headline figures, and the route and day
/// logs as JSON documents.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub trip_id:          u64,
    pub current_location: String,
    pub pickup_location:  String,
    pub dropoff_location: String,
    pub cycle_hours_used: f64,
    pub distance_miles:   f64,
    pub driving_hours:    f64,
    pub day_count:        u32,
    /// `RouteSummary` as JSON.
    pub route_json:       String,
    /// `Vec<DayLog>` as JSON.
    pub eld_logs_json:    String,
    pub created_at:       NaiveDateTime,
}

impl TripRecord {
    /// Build the record for `request` planned into `result`.
    pub fn new(
        trip_id:    u64,
        request:    &TripRequest,
        result:     &SimulationResult,
        created_at: NaiveDateTime,
    ) -> OutputResult<Self> {
        Ok(Self {
            trip_id,
            current_location: request.current_location.clone(),
            pickup_location:  request.pickup_location.clone(),
            dropoff_location: request.dropoff_location.clone(),
            cycle_hours_used: request.cycle_hours_used,
            distance_miles:   result.route.total_miles(),
            driving_hours:    result.total_driving_hours(),
            day_count:        result.days.len() as u32,
            route_json:       serde_json::to_string(&result.route)?,
            eld_logs_json:    serde_json::to_string(&result.days)?,
            created_at,
        })
    }
}
