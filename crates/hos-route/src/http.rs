//! Blocking [`HttpTransport`] over `ureq` (feature `ors`).
//!
//! Every failure maps to [`RouteError::Transient`]: refused or timed-out
//! connections, non-2xx statuses (with the start of the error body), and
//! bodies that cannot be read.

use std::time::Duration;

use crate::{HttpTransport, RouteError, RouteResult};

/// Per-request timeout used by [`UreqTransport::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an error body carried into the error message.
const ERROR_BODY_CHARS: usize = 200;

/// Shares one connection-pooling `ureq` agent; clones share the pool.
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn read_body(response: Result<ureq::Response, ureq::Error>) -> RouteResult<String> {
    match response {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| RouteError::Transient(format!("reading response body: {e}"))),
        Err(ureq::Error::Status(code, resp)) => {
            let body: String = resp
                .into_string()
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_CHARS)
                .collect();
            Err(RouteError::Transient(format!("HTTP {code}: {}", body.trim())))
        }
        Err(other) => Err(RouteError::Transient(other.to_string())),
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> RouteResult<String> {
        let request = query
            .iter()
            .fold(self.agent.get(url), |req, (key, value)| req.query(key, value));
        read_body(request.call())
    }

    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &str) -> RouteResult<String> {
        let request = headers.iter().fold(
            self.agent.post(url).set("Content-Type", "application/json"),
            |req, (name, value)| req.set(name, value),
        );
        read_body(request.send_string(body))
    }
}
