//! Data transfer objects for web requests and responses.

use serde::Serialize;

use crate::domain::{Location, Route};

/// A validated `/routes` query.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutesRequest {
    /// Where every route starts
    pub source: Location,

    /// Candidate destinations, in query order
    pub destinations: Vec<Location>,
}

/// Response body of `GET /routes`.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    /// The source as given in the query
    pub source: Location,

    /// Routes, fastest first
    pub routes: Vec<RouteResult>,
}

/// One route in a [`RoutesResponse`].
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub destination: Location,

    /// Metres
    pub distance: f64,

    /// Seconds
    pub duration: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Response body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: &'static str,

    pub service: &'static str,

    /// `healthy`, `timeout` or `unavailable`
    pub osrm: &'static str,
}

// Conversion implementations

impl From<Route> for RouteResult {
    fn from(route: Route) -> Self {
        Self {
            destination: route.destination,
            distance: route.distance,
            duration: route.duration,
        }
    }
}

impl RoutesResponse {
    /// Build the response for `source` from ranked routes.
    pub fn new(source: Location, routes: Vec<Route>) -> Self {
        Self {
            source,
            routes: routes.into_iter().map(RouteResult::from).collect(),
        }
    }
}
