//! Trip orchestration: names → coordinates → route → duty log.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use hos_core::Coordinate;
use hos_route::{Geocoder, RouteOptions, RouteProvider, RouteResult};

use crate::{
    NoopObserver, PlanError, PlanResult, PlannerBuilder, SimError, SimObserver, SimulationResult,
    Simulator,
};

// ── TripRequest ───────────────────────────────────────────────────────────────

/// Which of the three trip locations a name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocationRole {
    Current,
    Pickup,
    Dropoff,
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocationRole::Current => "current",
            LocationRole::Pickup  => "pickup",
            LocationRole::Dropoff => "dropoff",
        })
    }
}

/// Input to [`TripPlanner::plan`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location:  String,
    pub dropoff_location: String,
    /// On-duty hours already used in the current cycle.
    #[serde(rename = "current_cycle_used_hrs", alias = "cycle_hours_used")]
    pub cycle_hours_used: f64,
}

impl TripRequest {
    /// The three location names in trip order.
    pub fn locations(&self) -> [(LocationRole, &str); 3] {
        [
            (LocationRole::Current, self.current_location.as_str()),
            (LocationRole::Pickup,  self.pickup_location.as_str()),
            (LocationRole::Dropoff, self.dropoff_location.as_str()),
        ]
    }

    /// Check the request before any collaborator is called.
    pub fn validate(&self, weekly_cycle_limit: f64) -> PlanResult<()> {
        for (role, name) in self.locations() {
            if name.trim().is_empty() {
                return Err(PlanError::InvalidRequest(format!("{role} location is empty")));
            }
        }
        let used = self.cycle_hours_used;
        if !(used.is_finite() && (0.0..weekly_cycle_limit).contains(&used)) {
            return Err(SimError::InvalidCycle { used, limit: weekly_cycle_limit }.into());
        }
        Ok(())
    }
}

// ── TripPlanner ───────────────────────────────────────────────────────────────

/// Composes a [`Geocoder`], a [`RouteProvider`], and the [`Simulator`].
///
/// Create via [`PlannerBuilder`] or [`TripPlanner::builder`].  A planner holds
/// no per-trip state; `plan` may be called concurrently.
pub struct TripPlanner<G: Geocoder, R: RouteProvider> {
    pub(crate) geocoder:      G,
    pub(crate) router:        R,
    pub(crate) simulator:     Simulator,
    pub(crate) route_options: RouteOptions,
}

impl<G: Geocoder, R: RouteProvider> TripPlanner<G, R> {
    pub fn builder(geocoder: G, router: R) -> PlannerBuilder<G, R> {
        PlannerBuilder::new(geocoder, router)
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Plan `request` with the trip starting at `start`.
    pub fn plan(&self, request: &TripRequest, start: NaiveDateTime) -> PlanResult<SimulationResult> {
        self.plan_observed(request, start, &mut NoopObserver)
    }

    /// Like [`plan`][Self::plan], reporting simulation progress to `observer`.
    pub fn plan_observed<O: SimObserver>(
        &self,
        request:  &TripRequest,
        start:    NaiveDateTime,
        observer: &mut O,
    ) -> PlanResult<SimulationResult> {
        request.validate(self.simulator.rules().weekly_cycle_limit)?;

        let coordinates = self.resolve_all(request)?;
        log::debug!(
            "resolved {} → {} → {}",
            coordinates[0], coordinates[1], coordinates[2],
        );

        let route = self
            .router
            .fetch_route(&coordinates, &self.route_options)
            .map_err(PlanError::Route)?;
        log::info!(
            "route {:?} → {:?}: {:.1} mi, {:.2} h over {} legs",
            request.pickup_location,
            request.dropoff_location,
            route.total_miles(),
            route.total_hours(),
            route.legs.len(),
        );

        let result = self
            .simulator
            .run_observed(route, request.cycle_hours_used, start, observer)?;
        log::info!("planned {} days", result.days.len());
        Ok(result)
    }

    // ── Location resolution ───────────────────────────────────────────────

    /// Resolve current, pickup, and dropoff, returning them in that order.
    /// The first failure in trip order wins.
    fn resolve_all(&self, request: &TripRequest) -> PlanResult<[Coordinate; 3]> {
        let [current, pickup, dropoff] = request.locations();
        let (c, p, d) = self.resolve_three(current.1, pickup.1, dropoff.1);
        Ok([
            wrap(current, c)?,
            wrap(pickup, p)?,
            wrap(dropoff, d)?,
        ])
    }

    #[cfg(not(feature = "parallel"))]
    fn resolve_three(
        &self,
        current: &str,
        pickup:  &str,
        dropoff: &str,
    ) -> (RouteResult<Coordinate>, RouteResult<Coordinate>, RouteResult<Coordinate>) {
        (
            self.geocoder.resolve(current),
            self.geocoder.resolve(pickup),
            self.geocoder.resolve(dropoff),
        )
    }

    #[cfg(feature = "parallel")]
    fn resolve_three(
        &self,
        current: &str,
        pickup:  &str,
        dropoff: &str,
    ) -> (RouteResult<Coordinate>, RouteResult<Coordinate>, RouteResult<Coordinate>) {
        let (c, (p, d)) = rayon::join(
            || self.geocoder.resolve(current),
            || rayon::join(|| self.geocoder.resolve(pickup), || self.geocoder.resolve(dropoff)),
        );
        (c, p, d)
    }
}

fn wrap(
    (role, name): (LocationRole, &str),
    result:       RouteResult<Coordinate>,
) -> PlanResult<Coordinate> {
    result.map_err(|source| {
        log::warn!("{role} location {name:?} failed to resolve: {source}");
        PlanError::Resolve { role, name: name.to_owned(), source }
    })
}
