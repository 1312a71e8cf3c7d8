//! Fastest-route server.
//!
//! Answers: "from this source, which of these destinations can I reach
//! soonest?" by asking an OSRM routing engine for a distance/duration table
//! and ranking the results fastest first.

pub mod config;
pub mod context;
pub mod domain;
pub mod fetch;
pub mod osrm;
pub mod service;
pub mod web;

#[cfg(test)]
mod test_support;
