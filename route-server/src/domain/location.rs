//! Coordinate tokens.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

impl InvalidLocation {
    /// Human-readable reason for the rejection.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A "latitude,longitude" coordinate pair.
///
/// Once constructed, a `Location` is treated as an opaque token: it is
/// interpolated into routing-engine URLs as-is and compared by its text.
/// Validation happens only in [`Location::parse`].
///
/// # Examples
///
/// ```
/// use route_server::domain::Location;
///
/// let loc = Location::parse("52.517037,13.388860").unwrap();
/// assert_eq!(loc.as_str(), "52.517037,13.388860");
///
/// // Both parts are required
/// assert!(Location::parse("52.517037").is_err());
///
/// // Bounds are exclusive
/// assert!(Location::parse("90,0").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Parse a location from a "latitude,longitude" string.
    ///
    /// Latitude must lie strictly within (-90, 90) and longitude strictly
    /// within (-180, 180).
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        if s.is_empty() {
            return Err(InvalidLocation {
                reason: "location is required",
            });
        }

        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidLocation {
                reason: "location must be in the format of latitude,longitude",
            });
        };

        let latitude = parse_coordinate(lat).ok_or(InvalidLocation {
            reason: "invalid latitude",
        })?;
        let longitude = parse_coordinate(lon).ok_or(InvalidLocation {
            reason: "invalid longitude",
        })?;

        if latitude <= -90.0 || latitude >= 90.0 {
            return Err(InvalidLocation {
                reason: "latitude out of range",
            });
        }
        if longitude <= -180.0 || longitude >= 180.0 {
            return Err(InvalidLocation {
                reason: "longitude out of range",
            });
        }

        Ok(Location(s.to_string()))
    }

    /// Returns the location as it was given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// NaN and infinities are rejected along with unparseable text.
fn parse_coordinate(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.0)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
