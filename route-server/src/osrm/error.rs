//! OSRM adapter error types.

use crate::domain::Location;
use crate::fetch::FetchError;
use crate::service::RouteError;

use super::types::OsrmCode;

/// Ways a table response can disagree with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeViolation {
    /// An annotation was absent from an `Ok` response.
    #[error("missing {0} annotation")]
    MissingAnnotation(&'static str),

    /// An annotation did not contain exactly one source row.
    #[error("expected 1 {annotation} row, got {rows}")]
    RowCount {
        annotation: &'static str,
        rows: usize,
    },

    /// The durations and distances rows differ in length.
    #[error("durations row has {durations} columns but distances row has {distances}")]
    LengthMismatch { durations: usize, distances: usize },

    /// The rows do not have one column per coordinate.
    #[error("expected {expected} columns, got {found}")]
    ColumnCount { expected: usize, found: usize },

    /// A duration or distance below zero.
    #[error("negative duration or distance for destination {destination}")]
    NegativeCost { destination: Location },
}

/// Errors from the OSRM adapter.
#[derive(Debug, thiserror::Error)]
pub enum OsrmError {
    /// Fetching the table failed; the fetch error says how.
    #[error("failed to get table response from OSRM ({url}): {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// OSRM answered with a code other than `Ok`.
    #[error(
        "OSRM error [{code}]: {}{}",
        .code.description(),
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Provider {
        code: OsrmCode,
        message: Option<String>,
    },

    /// The matrix does not match the request's dimensions.
    #[error("OSRM: unexpected table response structure: {0}")]
    UnexpectedShape(#[from] ShapeViolation),

    /// OSRM found no route to one of the destinations.
    #[error("OSRM: no route to destination {destination}")]
    NoRoute { destination: Location },
}

impl OsrmError {
    /// The provider code, for [`OsrmError::Provider`].
    pub fn code(&self) -> Option<&OsrmCode> {
        match self {
            OsrmError::Provider { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The underlying fetch failure, if the error came from the fetcher.
    pub fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            OsrmError::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the request's context was cancelled or expired.
    pub fn is_cancelled(&self) -> bool {
        self.fetch_error().is_some_and(FetchError::is_cancelled)
    }

    /// Whether the fetcher ran out of attempts on retryable failures.
    pub fn retries_exhausted(&self) -> bool {
        self.fetch_error().is_some_and(FetchError::retries_exhausted)
    }
}

impl RouteError for OsrmError {
    fn is_cancelled(&self) -> bool {
        OsrmError::is_cancelled(self)
    }

    fn is_transient(&self) -> bool {
        self.retries_exhausted()
    }
}
