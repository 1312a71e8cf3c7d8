//! Scripted route finder for testing without an OSRM server.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::RequestContext;
use crate::domain::{Location, Route};
use crate::service::RouteFinder;

use super::error::OsrmError;

type Script = dyn Fn(&Location, &[Location]) -> Result<Vec<Route>, OsrmError> + Send + Sync;

/// Route finder whose answers come from a closure.
///
/// Counts how many times it has been asked, so tests can check that
/// callers did (or did not) reach the finder.
#[derive(Clone)]
pub struct MockRouteFinder {
    script: Arc<Script>,
    calls: Arc<AtomicUsize>,
}

impl MockRouteFinder {
    /// Answer every request with `script(source, destinations)`.
    pub fn new<S>(script: S) -> Self
    where
        S: Fn(&Location, &[Location]) -> Result<Vec<Route>, OsrmError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer with one route per destination, with the given durations and
    /// distances taken in destination order.
    ///
    /// Destinations beyond the scripted values get a zero-length route.
    pub fn with_costs(durations: Vec<f64>, distances: Vec<f64>) -> Self {
        Self::new(move |_, destinations| {
            Ok(destinations
                .iter()
                .enumerate()
                .map(|(i, destination)| {
                    Route::new(
                        destination.clone(),
                        distances.get(i).copied().unwrap_or_default(),
                        durations.get(i).copied().unwrap_or_default(),
                    )
                })
                .collect())
        })
    }

    /// Number of requests answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for MockRouteFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRouteFinder")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl RouteFinder for MockRouteFinder {
    type Error = OsrmError;

    async fn find_fastest_routes(
        &self,
        _ctx: &RequestContext,
        source: &Location,
        destinations: &[Location],
    ) -> Result<Vec<Route>, OsrmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(source, destinations)
    }
}
