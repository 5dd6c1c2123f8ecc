//! The simulator's output artifact.

use serde::{Deserialize, Serialize};

use hos_core::{DayLog, DutyStatus};
use hos_route::RouteSummary;

/// The route a trip was scheduled over and its day-by-day duty log.
///
/// Index 0 of `days` is the trip start day.  Serializes to
/// `{ "route": {..}, "days": [{ "date", "events": [..] }] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub route: RouteSummary,
    pub days:  Vec<DayLog>,
}

impl SimulationResult {
    /// Sum of driving hours over all days.
    pub fn total_driving_hours(&self) -> f64 {
        self.days.iter().map(DayLog::driving_hours).sum()
    }

    /// Sum of hours under `status` over all days.
    pub fn total_hours(&self, status: DutyStatus) -> f64 {
        self.days.iter().map(|d| d.hours(status)).sum()
    }

    /// Number of events over all days.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(DayLog::len).sum()
    }
}
