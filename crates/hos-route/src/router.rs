//! Route provider trait and the offline straight-line implementation.
//!
//! # Pluggability
//!
//! The planner calls routing through the [`RouteProvider`] trait, so the
//! application picks the backend: [`OrsClient`][crate::OrsClient] for real
//! road routing, or [`StraightLineRouter`] for offline runs and tests.

use hos_core::Coordinate;

use crate::{RouteError, RouteLeg, RouteResult, RouteSummary};

// ── RouteOptions ──────────────────────────────────────────────────────────────

/// Vehicle class the route is computed for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VehicleProfile {
    /// Heavy goods vehicle (truck).
    #[default]
    HeavyVehicle,
}

impl VehicleProfile {
    /// Profile name as used by Openrouteservice.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleProfile::HeavyVehicle => "driving-hgv",
        }
    }
}

/// Road features the route must avoid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AvoidFeature {
    Ferries,
    Tollways,
}

impl AvoidFeature {
    pub fn as_str(self) -> &'static str {
        match self {
            AvoidFeature::Ferries  => "ferries",
            AvoidFeature::Tollways => "tollways",
        }
    }
}

/// Per-request routing options.  The default is a heavy vehicle avoiding
/// ferries and tollways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteOptions {
    pub profile: VehicleProfile,
    pub avoid:   Vec<AvoidFeature>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            profile: VehicleProfile::HeavyVehicle,
            avoid:   vec![AvoidFeature::Ferries, AvoidFeature::Tollways],
        }
    }
}

// ── RouteProvider trait ───────────────────────────────────────────────────────

/// Pluggable routing backend.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a planner can be shared across
/// request-handling threads.
pub trait RouteProvider: Send + Sync {
    /// Compute one route visiting `coordinates` in order.
    ///
    /// Fails with [`RouteError::RouteUnavailable`] when no usable route
    /// exists and [`RouteError::Transient`] on I/O failure.
    fn fetch_route(
        &self,
        coordinates: &[Coordinate],
        options:     &RouteOptions,
    ) -> RouteResult<RouteSummary>;
}

// ── StraightLineRouter ────────────────────────────────────────────────────────

/// Offline router: great-circle distance inflated by a detour factor, driven
/// at a constant average speed.
///
/// Each consecutive waypoint pair becomes one leg.  The geometry is the
/// waypoints themselves.  Avoid-features are ignored.
#[derive(Clone, Debug)]
pub struct StraightLineRouter {
    /// Average truck speed in km/h.  Default: 88.5 (55 mph).
    pub average_speed_kmh: f64,
    /// Road distance ÷ great-circle distance.  Default: 1.2.
    pub detour_factor:     f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self { average_speed_kmh: 88.5, detour_factor: 1.2 }
    }
}

impl StraightLineRouter {
    fn leg(&self, from: Coordinate, to: Coordinate) -> RouteLeg {
        let distance_m = from.distance_m(to) * self.detour_factor;
        let speed_mps = self.average_speed_kmh / 3.6;
        RouteLeg { distance_m, duration_s: distance_m / speed_mps }
    }
}

impl RouteProvider for StraightLineRouter {
    fn fetch_route(
        &self,
        coordinates: &[Coordinate],
        _options:    &RouteOptions,
    ) -> RouteResult<RouteSummary> {
        if coordinates.len() < 2 {
            return Err(RouteError::RouteUnavailable(format!(
                "need at least two waypoints, got {}",
                coordinates.len()
            )));
        }
        if let Some(bad) = coordinates.iter().find(|c| !c.is_valid()) {
            return Err(RouteError::RouteUnavailable(format!("invalid waypoint {bad}")));
        }
        if !(self.average_speed_kmh > 0.0 && self.detour_factor >= 1.0) {
            return Err(RouteError::RouteUnavailable(format!(
                "router misconfigured: speed {} km/h, detour factor {}",
                self.average_speed_kmh, self.detour_factor
            )));
        }

        let legs = coordinates
            .windows(2)
            .map(|pair| self.leg(pair[0], pair[1]))
            .collect();

        Ok(RouteSummary::from_legs(legs, coordinates.to_vec()))
    }
}
