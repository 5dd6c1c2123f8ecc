//! Collaborator error type.

use thiserror::Error;

/// Errors produced by geocoders and route providers.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The service answered but found no match for the name.
    #[error("no location matches {0:?}")]
    LocationNotFound(String),

    /// Network or service failure; the caller may retry.
    #[error("transient network error: {0}")]
    Transient(String),

    /// Routing answered but produced no usable route.
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouteError {
    /// `true` for failures worth retrying at a higher layer.
    pub fn is_transient(&self) -> bool {
        matches!(self, RouteError::Transient(_))
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
