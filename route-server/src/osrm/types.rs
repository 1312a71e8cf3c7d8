//! OSRM table service wire types.

use std::fmt;

use serde::Deserialize;

/// Top-level `code` of an OSRM response.
///
/// Any tag OSRM documents is a named variant; anything else is kept
/// verbatim in [`OsrmCode::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum OsrmCode {
    Ok,
    InvalidUrl,
    InvalidService,
    InvalidVersion,
    InvalidOptions,
    InvalidQuery,
    InvalidValue,
    NoSegment,
    TooBig,
    Unknown(String),
}

impl OsrmCode {
    /// The wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            OsrmCode::Ok => "Ok",
            OsrmCode::InvalidUrl => "InvalidUrl",
            OsrmCode::InvalidService => "InvalidService",
            OsrmCode::InvalidVersion => "InvalidVersion",
            OsrmCode::InvalidOptions => "InvalidOptions",
            OsrmCode::InvalidQuery => "InvalidQuery",
            OsrmCode::InvalidValue => "InvalidValue",
            OsrmCode::NoSegment => "NoSegment",
            OsrmCode::TooBig => "TooBig",
            OsrmCode::Unknown(code) => code,
        }
    }

    /// What the code means, as documented by OSRM.
    pub fn description(&self) -> &str {
        match self {
            OsrmCode::Ok => "request could be processed as expected",
            OsrmCode::InvalidUrl => "URL string is invalid",
            OsrmCode::InvalidService => "service name is invalid",
            OsrmCode::InvalidVersion => "version is not found",
            OsrmCode::InvalidOptions => "options are invalid",
            OsrmCode::InvalidQuery => "query string is syntactically malformed",
            OsrmCode::InvalidValue => "query parameters are invalid",
            OsrmCode::NoSegment => {
                "one of the supplied input coordinates could not snap to street segment"
            }
            OsrmCode::TooBig => {
                "request size violates service specific request size restrictions"
            }
            OsrmCode::Unknown(_) => "unrecognised error code",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, OsrmCode::Ok)
    }
}

impl From<String> for OsrmCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "Ok" => OsrmCode::Ok,
            "InvalidUrl" => OsrmCode::InvalidUrl,
            "InvalidService" => OsrmCode::InvalidService,
            "InvalidVersion" => OsrmCode::InvalidVersion,
            "InvalidOptions" => OsrmCode::InvalidOptions,
            "InvalidQuery" => OsrmCode::InvalidQuery,
            "InvalidValue" => OsrmCode::InvalidValue,
            "NoSegment" => OsrmCode::NoSegment,
            "TooBig" => OsrmCode::TooBig,
            _ => OsrmCode::Unknown(code),
        }
    }
}

impl fmt::Display for OsrmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /table/v1/driving/...`.
///
/// Annotations are optional so that a response missing one decodes and is
/// then rejected by shape validation rather than by the decoder. A `null`
/// cell marks a pair OSRM could not route.
#[derive(Debug, Clone, Deserialize)]
pub struct TableResponse {
    pub code: OsrmCode,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}
