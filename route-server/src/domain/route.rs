//! Route results.

use super::Location;

/// Travel cost from a request's source to one destination.
///
/// Routes are created fresh for each request and are never mutated after
/// construction; ranking reorders them without touching their values.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Where this route ends.
    pub destination: Location,

    /// Driving distance in metres.
    pub distance: f64,

    /// Driving duration in seconds.
    pub duration: f64,
}

impl Route {
    /// Create a route to `destination`.
    pub fn new(destination: Location, distance: f64, duration: f64) -> Self {
        Self {
            destination,
            distance,
            duration,
        }
    }
}
