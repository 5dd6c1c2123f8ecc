//! Geocoder trait and the in-memory gazetteer implementation.

use std::collections::HashMap;

use hos_core::Coordinate;

use crate::{RouteError, RouteResult};

/// Resolves a free-text place name to a coordinate.
///
/// Implementations must be `Send + Sync`: the planner may resolve several
/// names concurrently (feature `parallel` in `hos-sim`).
pub trait Geocoder: Send + Sync {
    /// Fails with [`RouteError::LocationNotFound`] when nothing matches and
    /// [`RouteError::Transient`] on I/O failure.
    fn resolve(&self, name: &str) -> RouteResult<Coordinate>;
}

/// A fixed name → coordinate table.
///
/// Lookups ignore ASCII case and surrounding whitespace.  Typically loaded
/// with [`load_gazetteer_csv`][crate::load_gazetteer_csv].
#[derive(Clone, Debug, Default)]
pub struct Gazetteer {
    places: HashMap<String, Coordinate>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }

    /// Add or replace a place.  Returns the previous coordinate, if any.
    pub fn insert(&mut self, name: &str, at: Coordinate) -> Option<Coordinate> {
        self.places.insert(Self::key(name), at)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for Gazetteer {
    fn resolve(&self, name: &str) -> RouteResult<Coordinate> {
        self.places
            .get(&Self::key(name))
            .copied()
            .ok_or_else(|| RouteError::LocationNotFound(name.to_owned()))
    }
}
