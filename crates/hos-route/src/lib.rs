//! `hos-route` — location resolution and route retrieval.
//!
//! The planner never talks to a map service directly; it calls the two
//! collaborator traits defined here.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`summary`]   | `RouteSummary`, `RouteLeg`                                  |
//! | [`router`]    | `RouteProvider` trait, `RouteOptions`, `StraightLineRouter` |
//! | [`geocode`]   | `Geocoder` trait, `Gazetteer`                               |
//! | [`loader`]    | `load_gazetteer_csv`, `load_gazetteer_reader`               |
//! | [`polyline`]  | Encoded-polyline decoding                                   |
//! | [`ors`]       | `OrsClient` over an injected `HttpTransport`                |
//! | `http`        | `UreqTransport`, a blocking transport (feature `ors`)       |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                              |

pub mod error;
pub mod geocode;
#[cfg(feature = "ors")]
pub mod http;
pub mod loader;
pub mod ors;
pub mod polyline;
pub mod router;
pub mod summary;


pub use error::{RouteError, RouteResult};
pub use geocode::{Gazetteer, Geocoder};
#[cfg(feature = "ors")]
pub use http::UreqTransport;
pub use loader::{load_gazetteer_csv, load_gazetteer_reader};
pub use ors::{HttpTransport, OrsClient, OrsConfig};
pub use router::{AvoidFeature, RouteOptions, RouteProvider, StraightLineRouter, VehicleProfile};
pub use summary::{RouteLeg, RouteSummary};
