//! Route summary returned by a [`RouteProvider`][crate::RouteProvider].

use hos_core::Coordinate;
use hos_core::rules::METERS_PER_MILE;
use serde::{Deserialize, Serialize};

/// Distance and duration of one segment between consecutive waypoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    #[serde(rename = "distance")]
    pub distance_m: f64,
    #[serde(rename = "duration")]
    pub duration_s: f64,
}

/// A whole route over all waypoints.
///
/// `geometry` is for display only; the simulator reads the totals.  `legs`
/// holds one entry per waypoint pair, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(rename = "distance")]
    pub distance_m: f64,
    #[serde(rename = "duration")]
    pub duration_s: f64,
    pub geometry:   Vec<Coordinate>,
    pub legs:       Vec<RouteLeg>,
}

impl RouteSummary {
    /// Build a summary whose totals are the sums of `legs`.
    pub fn from_legs(legs: Vec<RouteLeg>, geometry: Vec<Coordinate>) -> Self {
        let distance_m = legs.iter().map(|l| l.distance_m).sum();
        let duration_s = legs.iter().map(|l| l.duration_s).sum();
        Self { distance_m, duration_s, geometry, legs }
    }

    /// Total duration in hours.
    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.duration_s / 3_600.0
    }

    /// Total distance in statute miles.
    #[inline]
    pub fn total_miles(&self) -> f64 {
        self.distance_m / METERS_PER_MILE
    }

    /// Average speed over the whole route in miles per hour, or `None` for a
    /// zero-duration route.
    pub fn average_mph(&self) -> Option<f64> {
        (self.duration_s > 0.0).then(|| self.total_miles() / self.total_hours())
    }
}
