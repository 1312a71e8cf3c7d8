//! OSRM table client.
//!
//! Issues one `table` request covering the source and every destination,
//! then projects the source row of the matrix into per-destination routes.

use tracing::{debug, error};

use crate::context::RequestContext;
use crate::domain::{Location, Route};
use crate::fetch::{FetchConfig, FetchError, Fetcher};
use crate::service::RouteFinder;

use super::error::{OsrmError, ShapeViolation};
use super::types::TableResponse;

/// Default base URL: the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Routing profile used for every request.
const PROFILE: &str = "driving";

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server, without a trailing slash
    pub base_url: String,
    /// Retry and timeout settings for the underlying fetcher
    pub fetch: FetchConfig,
}

impl OsrmConfig {
    /// Create a config pointing at the public OSRM server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing or a self-hosted server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the fetcher configuration.
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

/// OSRM API client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    fetcher: Fetcher,
    base_url: String,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config.fetch)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the table request for `source` against `destinations`.
    ///
    /// Only durations and distances are requested, with the source as the
    /// single row, which keeps the payload to one row of numbers.
    pub fn table_url(&self, source: &Location, destinations: &[Location]) -> String {
        let mut coordinates = String::from(source.as_str());
        for destination in destinations {
            coordinates.push(';');
            coordinates.push_str(destination.as_str());
        }

        format!(
            "{}/table/v1/{PROFILE}/{coordinates}?sources=0&annotations=duration,distance",
            self.base_url
        )
    }
}

impl RouteFinder for OsrmClient {
    type Error = OsrmError;

    /// One route per destination, in destination order.
    ///
    /// An empty destination list returns immediately without a request.
    async fn find_fastest_routes(
        &self,
        ctx: &RequestContext,
        source: &Location,
        destinations: &[Location],
    ) -> Result<Vec<Route>, OsrmError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.table_url(source, destinations);
        debug!(%source, destinations = destinations.len(), "requesting OSRM table");

        let table: TableResponse = self
            .fetcher
            .get_json(ctx, &url)
            .await
            .map_err(|source| OsrmError::Fetch {
                url: url.clone(),
                source,
            })?;

        project_routes(table, destinations).inspect_err(|e| {
            error!(%url, error = %e, "OSRM table rejected");
        })
    }
}

/// Turn a decoded table into routes.
///
/// Column 0 of the source row is the source-to-itself entry and is dropped;
/// destination `i` is read from column `i + 1`.
fn project_routes(
    table: TableResponse,
    destinations: &[Location],
) -> Result<Vec<Route>, OsrmError> {
    if !table.code.is_ok() {
        return Err(OsrmError::Provider {
            code: table.code,
            message: table.message.filter(|m| !m.is_empty()),
        });
    }

    let durations = single_row(table.durations, "durations")?;
    let distances = single_row(table.distances, "distances")?;

    if durations.len() != distances.len() {
        return Err(ShapeViolation::LengthMismatch {
            durations: durations.len(),
            distances: distances.len(),
        }
        .into());
    }

    let expected = destinations.len() + 1;
    if durations.len() != expected {
        return Err(ShapeViolation::ColumnCount {
            expected,
            found: durations.len(),
        }
        .into());
    }

    destinations
        .iter()
        .zip(durations.into_iter().zip(distances).skip(1))
        .map(|(destination, cell)| match cell {
            (Some(duration), Some(distance)) if duration < 0.0 || distance < 0.0 => {
                Err(ShapeViolation::NegativeCost {
                    destination: destination.clone(),
                }
                .into())
            }
            (Some(duration), Some(distance)) => {
                Ok(Route::new(destination.clone(), distance, duration))
            }
            _ => Err(OsrmError::NoRoute {
                destination: destination.clone(),
            }),
        })
        .collect()
}

/// The one row of an annotation, or the way it is malformed.
fn single_row(
    annotation: Option<Vec<Vec<Option<f64>>>>,
    name: &'static str,
) -> Result<Vec<Option<f64>>, ShapeViolation> {
    let mut rows = annotation.ok_or(ShapeViolation::MissingAnnotation(name))?;
    if rows.len() != 1 {
        return Err(ShapeViolation::RowCount {
            annotation: name,
            rows: rows.len(),
        });
    }
    Ok(rows.remove(0))
}
