//! HTTP route handlers.

use std::any::Any;

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::context::RequestContext;
use crate::domain::{InvalidLocation, Location};
use crate::service::{RouteError, RouteFinder};

use super::dto::*;
use super::state::AppState;
use super::validation::{ValidationError, validate_routes_query};

/// Name reported by `/health`.
const SERVICE_NAME: &str = "delivery-route-system";

/// Create the application router.
pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: RouteFinder + 'static,
{
    Router::new()
        .route("/health", get(health::<F>))
        .route("/routes", get(get_routes::<F>))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
///
/// Probes the routing engine with a short fixed route under its own
/// deadline, so a slow engine reports `timeout` instead of hanging.
async fn health<F: RouteFinder + 'static>(
    State(state): State<AppState<F>>,
) -> (StatusCode, Json<HealthResponse>) {
    let ctx = RequestContext::with_timeout(state.config.health_timeout);

    let osrm = match probe_locations() {
        Ok((source, destination)) => {
            match state
                .routes
                .get_fastest_routes(&ctx, &source, &[destination])
                .await
            {
                Ok(_) => "healthy",
                Err(e) if e.is_cancelled() => {
                    warn!(error = %e, "health probe timed out");
                    "timeout"
                }
                Err(e) => {
                    warn!(error = %e, "health probe failed");
                    "unavailable"
                }
            }
        }
        Err(e) => {
            error!(error = %e, "invalid health probe location");
            "unavailable"
        }
    };

    let (status_code, status) = if osrm == "healthy" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            service: SERVICE_NAME,
            osrm,
        }),
    )
}

fn probe_locations() -> Result<(Location, Location), InvalidLocation> {
    Ok((Location::parse("0,0")?, Location::parse("0.001,0.001")?))
}

/// Fastest routes from `src` to every `dst`.
///
/// `dst` may be repeated; the whole request runs under the configured
/// request timeout.
async fn get_routes<F: RouteFinder + 'static>(
    State(state): State<AppState<F>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<RoutesResponse>, AppError> {
    let request = validate_routes_query(uri.to_string().len(), &params).map_err(|e| {
        warn!(error = %e, "failed to validate routes request");
        AppError::Validation(e)
    })?;

    let ctx = RequestContext::with_timeout(state.config.request_timeout);
    let routes = state
        .routes
        .get_fastest_routes(&ctx, &request.source, &request.destinations)
        .await
        .map_err(|e| AppError::from_route_error(&e))?;

    Ok(Json(RoutesResponse::new(request.source, routes)))
}

/// Turn a panic in a handler into a JSON 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!(panic = detail, "panic recovered");

    AppError::Internal.into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The query failed validation
    Validation(ValidationError),

    /// The request's deadline passed or it was cancelled
    Timeout,

    /// Routing failed; the message is deliberately coarse
    Unavailable { message: &'static str },

    /// A handler panicked
    Internal,
}

impl AppError {
    fn from_route_error<E: RouteError>(err: &E) -> Self {
        if err.is_cancelled() {
            warn!(error = %err, "routes request timed out");
            return AppError::Timeout;
        }

        error!(error = %err, "failed to get routes");
        let message = if err.is_transient() {
            "service temporarily unavailable"
        } else {
            "route calculation failed"
        };
        AppError::Unavailable { message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
            }
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "request timeout"),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
