//! Per-day duty log: `DutyEvent` and `DayLog`.
//!
//! Field names on the wire follow the ELD log contract consumed by the API
//! layer: `{ "type", "start_time", "duration" }` for events and
//! `{ "date", "events" }` for days.  Durations are fractional hours.

use chrono::{NaiveDate, NaiveDateTime};

use crate::time::hours_to_duration;
use crate::DutyStatus;

// ── DutyEvent ─────────────────────────────────────────────────────────────────

/// One contiguous block of a single duty status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyEvent {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: DutyStatus,

    /// Absolute (timezone-naive) instant at which the block begins.
    pub start_time: NaiveDateTime,

    /// Length of the block in hours; always positive.
    #[cfg_attr(feature = "serde", serde(rename = "duration"))]
    pub duration_hours: f64,
}

impl DutyEvent {
    pub fn new(kind: DutyStatus, start_time: NaiveDateTime, duration_hours: f64) -> Self {
        debug_assert!(duration_hours > 0.0, "duty events must have positive duration");
        Self { kind, start_time, duration_hours }
    }

    /// Instant at which the block ends.
    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + hours_to_duration(self.duration_hours)
    }
}

// ── DayLog ────────────────────────────────────────────────────────────────────

/// The duty events of one calendar day of a trip, in chronological order.
///
/// Events can only be appended; once the simulator commits a day the log is
/// handed out by shared reference only.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayLog {
    pub date: NaiveDate,
    events:   Vec<DutyEvent>,
}

impl DayLog {
    /// An empty log for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { date, events: Vec::new() }
    }

    /// Append an event.  Callers append in chronological order.
    pub fn push(&mut self, event: DutyEvent) {
        debug_assert!(
            self.events.last().is_none_or(|prev| prev.start_time <= event.start_time),
            "events must be appended in chronological order"
        );
        self.events.push(event);
    }

    pub fn events(&self) -> &[DutyEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Total hours logged under `status`.
    pub fn hours(&self, status: DutyStatus) -> f64 {
        self.events
            .iter()
            .filter(|e| e.kind == status)
            .map(|e| e.duration_hours)
            .sum()
    }

    /// Hours spent driving.
    #[inline]
    pub fn driving_hours(&self) -> f64 {
        self.hours(DutyStatus::Driving)
    }

    /// Driving plus on-duty-not-driving hours.
    pub fn on_duty_hours(&self) -> f64 {
        self.events
            .iter()
            .filter(|e| e.kind.is_on_duty())
            .map(|e| e.duration_hours)
            .sum()
    }

    /// End of the last event, or `None` for an empty log.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.events.last().map(DutyEvent::end_time)
    }
}

// ── Remark ────────────────────────────────────────────────────────────────────

/// Why a duty event was laid down.  Not part of the per-day log contract;
/// reported to observers and written as the remark column by output
/// backends.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Remark {
    /// Mandatory daily rest at the start of a day.
    Rest,
    Pickup,
    Driving,
    Fueling,
    /// Non-driving duty filling out the on-duty window.
    OnDutyNotDriving,
    Dropoff,
    /// Off-duty time between the last duty block and midnight.
    Idle,
}

impl Remark {
    pub fn as_str(self) -> &'static str {
        match self {
            Remark::Rest             => "rest",
            Remark::Pickup           => "pickup",
            Remark::Driving          => "driving",
            Remark::Fueling          => "fueling",
            Remark::OnDutyNotDriving => "on_duty_not_driving",
            Remark::Dropoff          => "dropoff",
            Remark::Idle             => "idle",
        }
    }
}

impl std::fmt::Display for Remark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
