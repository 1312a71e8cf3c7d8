//! Route service: acquisition through a [`RouteFinder`], then ranking.

use tracing::debug;

use crate::context::RequestContext;
use crate::domain::{Location, Route};

use super::rank::rank_routes;

/// Classification the web layer needs from a finder's error.
pub trait RouteError: std::error::Error + Send + Sync + 'static {
    /// The request's context was cancelled or its deadline passed.
    fn is_cancelled(&self) -> bool;

    /// The upstream could not be reached or kept failing (network errors,
    /// 5xx responses after every retry).
    fn is_transient(&self) -> bool;
}

/// Source of unranked routes.
///
/// Implementations return one route per destination, in destination order,
/// or fail as a whole.
pub trait RouteFinder: Send + Sync {
    type Error: RouteError;

    /// Find a route from `source` to each of `destinations`.
    fn find_fastest_routes(
        &self,
        ctx: &RequestContext,
        source: &Location,
        destinations: &[Location],
    ) -> impl Future<Output = Result<Vec<Route>, Self::Error>> + Send;
}

/// Answers "which destination is fastest to reach" for one source.
#[derive(Debug)]
pub struct RouteService<F> {
    finder: F,
}

impl<F: RouteFinder> RouteService<F> {
    /// Create a service backed by `finder`.
    pub fn new(finder: F) -> Self {
        Self { finder }
    }

    /// The underlying finder.
    pub fn finder(&self) -> &F {
        &self.finder
    }

    /// Routes from `source` to every destination, fastest first.
    ///
    /// Ties on duration are broken by distance; identical routes keep their
    /// input order. Finder errors are returned unchanged and no partial list
    /// is ever produced.
    pub async fn get_fastest_routes(
        &self,
        ctx: &RequestContext,
        source: &Location,
        destinations: &[Location],
    ) -> Result<Vec<Route>, F::Error> {
        let routes = self
            .finder
            .find_fastest_routes(ctx, source, destinations)
            .await?;

        debug!(%source, routes = routes.len(), "ranking routes");
        Ok(rank_routes(routes))
    }
}
