//! Openrouteservice client.
//!
//! `OrsClient` implements both [`Geocoder`] and [`RouteProvider`] against
//! the Openrouteservice geocode-search and directions endpoints.  It owns no
//! HTTP stack: requests go through an [`HttpTransport`] supplied by the
//! application, which also owns timeouts and retry policy.  Credentials
//! arrive through [`OrsConfig`] at construction time.
//!
//! # Error mapping
//!
//! | Situation                          | Error                            |
//! |------------------------------------|----------------------------------|
//! | transport failure                  | whatever the transport returns (`Transient`) |
//! | geocode answer with no features    | `LocationNotFound`               |
//! | directions answer with no routes   | `RouteUnavailable`               |
//! | body that is not the expected JSON | `Parse`                          |

use serde::Deserialize;
use serde_json::json;

use hos_core::Coordinate;

use crate::polyline::{self, DEFAULT_PRECISION};
use crate::{Geocoder, RouteError, RouteLeg, RouteOptions, RouteProvider, RouteResult, RouteSummary};

// ── Transport ─────────────────────────────────────────────────────────────────

/// Minimal blocking HTTP interface used by [`OrsClient`].
///
/// Implementations return the response body for 2xx answers and
/// [`RouteError::Transient`] for connection failures and non-2xx statuses.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> RouteResult<String>;

    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &str) -> RouteResult<String>;
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Connection settings for Openrouteservice.
#[derive(Clone, Debug)]
pub struct OrsConfig {
    pub api_key:  String,
    /// Default: `https://api.openrouteservice.org`.
    pub base_url: String,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key:  api_key.into(),
            base_url: "https://api.openrouteservice.org".to_owned(),
        }
    }
}

// ── Response shapes ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Deserialize)]
struct GeocodeFeature {
    geometry: PointGeometry,
}

#[derive(Deserialize)]
struct PointGeometry {
    /// `[lon, lat]`.
    coordinates: [f64; 2],
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    summary:  DistanceDuration,
    geometry: String,
    #[serde(default)]
    segments: Vec<DistanceDuration>,
}

/// The service omits zero-valued totals, hence the defaults.
#[derive(Deserialize)]
struct DistanceDuration {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

// ── OrsClient ─────────────────────────────────────────────────────────────────

pub struct OrsClient<T: HttpTransport> {
    config:    OrsConfig,
    transport: T,
}

impl<T: HttpTransport> OrsClient<T> {
    pub fn new(config: OrsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// JSON body for a directions request.
    fn directions_body(coordinates: &[Coordinate], options: &RouteOptions) -> String {
        let coords: Vec<[f64; 2]> = coordinates.iter().map(|c| [c.lon, c.lat]).collect();
        let avoid: Vec<&str> = options.avoid.iter().map(|a| a.as_str()).collect();
        json!({
            "coordinates": coords,
            "profile":     options.profile.as_str(),
            "options":     { "avoid_features": avoid },
            "extra_info":  ["tollways"],
        })
        .to_string()
    }
}

fn parse<'a, D: Deserialize<'a>>(body: &'a str, what: &str) -> RouteResult<D> {
    serde_json::from_str(body).map_err(|e| RouteError::Parse(format!("{what} response: {e}")))
}

impl<T: HttpTransport> Geocoder for OrsClient<T> {
    fn resolve(&self, name: &str) -> RouteResult<Coordinate> {
        let body = self.transport.get(
            &self.url("geocode/search"),
            &[("api_key", self.config.api_key.as_str()), ("text", name)],
        )?;
        let response: GeocodeResponse = parse(&body, "geocode")?;

        let [lon, lat] = response
            .features
            .first()
            .map(|f| f.geometry.coordinates)
            .ok_or_else(|| RouteError::LocationNotFound(name.to_owned()))?;
        Ok(Coordinate::new(lon, lat))
    }
}

impl<T: HttpTransport> RouteProvider for OrsClient<T> {
    fn fetch_route(
        &self,
        coordinates: &[Coordinate],
        options:     &RouteOptions,
    ) -> RouteResult<RouteSummary> {
        let url = self.url(&format!("v2/directions/{}", options.profile.as_str()));
        let body = self.transport.post_json(
            &url,
            &[
                ("Accept", "application/json, application/geo+json"),
                ("Authorization", self.config.api_key.as_str()),
            ],
            &Self::directions_body(coordinates, options),
        )?;
        let response: DirectionsResponse = parse(&body, "directions")?;

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::RouteUnavailable("no routes in directions response".to_owned()))?;

        Ok(RouteSummary {
            distance_m: route.summary.distance,
            duration_s: route.summary.duration,
            geometry:   polyline::decode(&route.geometry, DEFAULT_PRECISION)?,
            legs:       route
                .segments
                .into_iter()
                .map(|s| RouteLeg { distance_m: s.distance, duration_s: s.duration })
                .collect(),
        })
    }
}
