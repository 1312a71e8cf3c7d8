//! OSRM table service adapter.
//!
//! Answers route queries with a single call to OSRM's `table` service:
//! - the source is the only row (`sources=0`), so the response carries one
//!   row of durations (seconds) and one of distances (metres)
//! - column 0 is the source to itself and is ignored
//! - every non-`Ok` code becomes a typed [`OsrmError::Provider`]
//!
//! Transport retries and cancellation are handled by [`crate::fetch`].

mod client;
mod error;
mod mock;
mod types;

pub use client::{OsrmClient, OsrmConfig};
pub use error::{OsrmError, ShapeViolation};
pub use mock::MockRouteFinder;
pub use types::{OsrmCode, TableResponse};
