//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::{RouteFinder, RouteService};

/// Shared application state.
///
/// Generic over the route finder so handlers can be exercised against a
/// scripted finder.
pub struct AppState<F> {
    /// Route aggregation service
    pub routes: Arc<RouteService<F>>,

    /// HTTP-layer timeouts
    pub config: Arc<ServerConfig>,
}

impl<F: RouteFinder> AppState<F> {
    /// Create a new app state.
    pub fn new(routes: RouteService<F>, config: ServerConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            config: Arc::new(config),
        }
    }
}

// Manual impl: `F` itself need not be `Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            config: self.config.clone(),
        }
    }
}
