//! Route aggregation.
//!
//! Turns a source and a list of destinations into routes ordered fastest
//! first. Acquisition is delegated to a [`RouteFinder`]; this module adds
//! only the ordering.

mod rank;
mod routes;

pub use rank::{fastest_first, rank_routes};
pub use routes::{RouteError, RouteFinder, RouteService};
