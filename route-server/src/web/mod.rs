//! Web layer for the fastest-route service.
//!
//! Provides `GET /routes` and `GET /health`, with request validation,
//! per-request deadlines and error-to-status mapping.

mod dto;
mod routes;
mod state;
mod validation;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use validation::{MAX_DESTINATIONS, MAX_URL_CHARS, ValidationError, validate_routes_query};
