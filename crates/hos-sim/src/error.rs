use hos_core::CoreError;
use hos_route::RouteError;
use thiserror::Error;

use crate::LocationRole;

/// Failures of [`simulate`][crate::simulate] and the [`Simulator`][crate::Simulator].
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("cycle hours used {used} outside [0, {limit})")]
    InvalidCycle { used: f64, limit: f64 },

    #[error("weekly cycle exhausted on day {day} with {driving_hours_remaining:.2} h of driving left")]
    CycleExhausted {
        day:                     usize,
        driving_hours_remaining: f64,
    },

    #[error("invalid rules: {0}")]
    Rules(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failures of [`TripPlanner::plan`][crate::TripPlanner::plan].
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),

    #[error("could not resolve {role} location {name:?}: {source}")]
    Resolve {
        role:   LocationRole,
        name:   String,
        #[source]
        source: RouteError,
    },

    #[error("route lookup failed: {0}")]
    Route(#[source] RouteError),

    #[error(transparent)]
    Simulation(#[from] SimError),
}

impl PlanError {
    /// `true` when the caller's input is at fault (bad names, bad cycle
    /// hours, unknown places) rather than a collaborator or the network.
    pub fn is_client_error(&self) -> bool {
        match self {
            PlanError::InvalidRequest(_) => true,
            PlanError::Resolve { source, .. } => matches!(source, RouteError::LocationNotFound(_)),
            PlanError::Route(_) => false,
            PlanError::Simulation(e) => !matches!(e, SimError::Rules(_)),
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
