//! Resilient HTTP fetcher.
//!
//! Performs one logical GET against an arbitrary URL and decodes the JSON
//! body into a caller-chosen type. Key characteristics:
//! - 5xx responses and network failures are retried with exponential
//!   back-off; only the last failure is reported
//! - any other non-200 status, and any 200 body that fails to decode, ends
//!   the call immediately
//! - the caller's [`RequestContext`](crate::context::RequestContext) is
//!   raced at every await, and cancellation beats a pending retry
//! - a 200 body larger than the configured cap ends the call without being
//!   buffered in full

mod client;
mod config;
mod error;

pub use client::Fetcher;
pub use config::{
    DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, FetchConfig,
};
pub use error::FetchError;
