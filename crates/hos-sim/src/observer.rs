//! Simulation observer trait for progress reporting and data collection.

use chrono::NaiveDate;

use hos_core::{DayLog, DutyEvent, Remark};

use crate::SimulationResult;

/// Callbacks invoked by [`Simulator::run_observed`][crate::Simulator::run_observed]
/// as the duty log is built.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  `day` is the zero-based day index.
pub trait SimObserver {
    /// Called when a new day begins, before its first event.
    fn on_day_start(&mut self, _day: usize, _date: NaiveDate) {}

    /// Called after each event is appended to the current day.
    fn on_event(&mut self, _day: usize, _event: &DutyEvent, _remark: Remark) {}

    /// Called once a day is complete.
    fn on_day_end(&mut self, _day: usize, _log: &DayLog) {}

    /// Called once after the final day, with the complete result.
    fn on_sim_end(&mut self, _result: &SimulationResult) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// A [`SimObserver`] that reports through the `log` facade: one `debug!`
/// line per event and an `info!` line per day and per trip.
pub struct LogObserver;

impl SimObserver for LogObserver {
    fn on_event(&mut self, day: usize, event: &DutyEvent, remark: Remark) {
        log::debug!(
            "day {day}: {} {:>13} {:>6.2} h ({remark})",
            event.start_time.format("%Y-%m-%d %H:%M"),
            event.kind,
            event.duration_hours,
        );
    }

    fn on_day_end(&mut self, day: usize, log: &DayLog) {
        log::info!(
            "day {day} ({}): {} events, {:.2} h driving, {:.2} h on duty",
            log.date,
            log.len(),
            log.driving_hours(),
            log.on_duty_hours(),
        );
    }

    fn on_sim_end(&mut self, result: &SimulationResult) {
        log::info!(
            "trip scheduled over {} days: {:.1} mi, {:.2} h driving",
            result.days.len(),
            result.route.total_miles(),
            result.total_driving_hours(),
        );
    }
}
