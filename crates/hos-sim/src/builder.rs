//! Fluent builder for constructing a [`TripPlanner`].

use hos_core::{DropoffPlacement, HosRules};
use hos_route::{Geocoder, RouteOptions, RouteProvider};

use crate::{SimResult, Simulator, TripPlanner};

/// Fluent builder for [`TripPlanner<G, R>`].
///
/// # Required inputs
///
/// - `G: Geocoder`, e.g. [`hos_route::Gazetteer`] or [`hos_route::OrsClient`]
/// - `R: RouteProvider`, e.g. [`hos_route::StraightLineRouter`] or [`hos_route::OrsClient`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.rules(r)`          | `HosRules::default()`                     |
/// | `.dropoff(p)`        | the placement inside `rules`              |
/// | `.route_options(o)`  | heavy vehicle, avoid ferries and tollways |
///
/// # Example
///
/// ```rust,ignore
/// let planner = TripPlanner::builder(gazetteer, StraightLineRouter::default())
///     .dropoff(DropoffPlacement::FinalDayOnly)
///     .build()?;
/// let result = planner.plan(&request, start)?;
/// ```
pub struct PlannerBuilder<G: Geocoder, R: RouteProvider> {
    geocoder:      G,
    router:        R,
    rules:         HosRules,
    route_options: RouteOptions,
}

impl<G: Geocoder, R: RouteProvider> PlannerBuilder<G, R> {
    pub fn new(geocoder: G, router: R) -> Self {
        Self {
            geocoder,
            router,
            rules:         HosRules::default(),
            route_options: RouteOptions::default(),
        }
    }

    /// Replace the whole rule set.
    pub fn rules(mut self, rules: HosRules) -> Self {
        self.rules = rules;
        self
    }

    /// Override only the dropoff placement of the current rules.
    pub fn dropoff(mut self, placement: DropoffPlacement) -> Self {
        self.rules.dropoff = placement;
        self
    }

    pub fn route_options(mut self, options: RouteOptions) -> Self {
        self.route_options = options;
        self
    }

    /// Validate the rules and return a ready-to-use [`TripPlanner`].
    pub fn build(self) -> SimResult<TripPlanner<G, R>> {
        Ok(TripPlanner {
            geocoder:      self.geocoder,
            router:        self.router,
            simulator:     Simulator::new(self.rules)?,
            route_options: self.route_options,
        })
    }
}
