//! Trip time model.
//!
//! # Design
//!
//! Duty durations are fractional hours (`f64`) because route durations are
//! arbitrary seconds and the rule set is expressed in hours.  Instants are
//! timezone-naive `chrono::NaiveDateTime` values: the planner schedules in
//! the driver's home-terminal time and never converts zones.
//!
//! Converting hours to a `Duration` rounds to whole milliseconds, so a chain
//! of events drifts by at most a few milliseconds per day.  Comparisons that
//! decide whether an event should exist at all use [`MIN_EVENT_HOURS`].
//!
//! The clock is always seeded from an explicit start instant; nothing in the
//! planner reads the wall clock.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Events shorter than one second are treated as rounding noise.
pub const MIN_EVENT_HOURS: f64 = 1.0 / 3_600.0;

/// Convert fractional hours to a `Duration`, rounded to the millisecond.
#[inline]
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// Convert a `Duration` to fractional hours.
#[inline]
pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

/// Midnight at the start of `date`.
#[inline]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// ── TripClock ─────────────────────────────────────────────────────────────────

/// The simulator's notion of "now".
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TripClock {
    /// Instant at which the trip started.
    pub start: NaiveDateTime,
    /// Current instant, advanced as duty events are laid down.
    pub now:   NaiveDateTime,
}

impl TripClock {
    /// A clock positioned at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self { start, now: start }
    }

    /// Calendar date of the current instant.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }

    /// Move forward by `hours`.
    #[inline]
    pub fn advance_hours(&mut self, hours: f64) {
        self.now += hours_to_duration(hours);
    }

    /// The next 00:00 strictly after the current date begins.
    pub fn next_midnight(&self) -> NaiveDateTime {
        // Dates near NaiveDate::MAX are far outside any trip; saturate.
        self.date()
            .succ_opt()
            .map(start_of_day)
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Move to the start of the next calendar day.  A clock already sitting
    /// on 00:00 is at the start of that day and stays put.
    pub fn roll_to_next_day(&mut self) {
        if self.now.time() != NaiveTime::MIN {
            self.now = self.next_midnight();
        }
    }

    /// Hours left between now and the end of the current calendar date.
    pub fn hours_until_midnight(&self) -> f64 {
        duration_to_hours(self.next_midnight() - self.now)
    }

    /// Hours elapsed since the trip started.
    pub fn elapsed_hours(&self) -> f64 {
        duration_to_hours(self.now - self.start)
    }
}

impl fmt::Display for TripClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{:.2} h)", self.now.format("%Y-%m-%d %H:%M"), self.elapsed_hours())
    }
}
