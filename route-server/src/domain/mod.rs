//! Domain types for the route server.
//!
//! `Location` is validated at construction, so code that receives one can
//! interpolate it into upstream requests without checking it again.

mod location;
mod route;

pub use location::{InvalidLocation, Location};
pub use route::Route;
