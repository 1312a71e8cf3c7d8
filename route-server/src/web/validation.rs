//! Query validation for `/routes`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::Location;

use super::dto::RoutesRequest;

/// Longest request URI accepted, in characters.
pub const MAX_URL_CHARS: usize = 2048;

/// Most destinations accepted in one query.
pub const MAX_DESTINATIONS: usize = 80;

/// Field-to-message map of everything wrong with a request.
///
/// Serializes as a flat JSON object; fields are kept in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError(BTreeMap<String, String>);

impl ValidationError {
    fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// The message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a `/routes` query.
///
/// `uri_len` is the length of the request URI (path and query); `params`
/// are the decoded query pairs in order. Every problem is collected rather
/// than stopping at the first.
pub fn validate_routes_query(
    uri_len: usize,
    params: &[(String, String)],
) -> Result<RoutesRequest, ValidationError> {
    let mut errors = ValidationError::default();

    if uri_len > MAX_URL_CHARS {
        errors.insert(
            "url",
            format!("URL is longer than {MAX_URL_CHARS} characters"),
        );
    }

    let source = match params.iter().find(|(k, _)| k == "src").map(|(_, v)| v) {
        None => {
            errors.insert("src", "source location is required");
            None
        }
        Some(v) if v.is_empty() => {
            errors.insert("src", "source location is required");
            None
        }
        Some(v) => match Location::parse(v) {
            Ok(loc) => Some(loc),
            Err(e) => {
                errors.insert("src", e.reason());
                None
            }
        },
    };

    let raw_destinations: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "dst")
        .map(|(_, v)| v.as_str())
        .collect();

    if raw_destinations.is_empty() {
        errors.insert("dst", "destination location is required");
    } else if raw_destinations.len() > MAX_DESTINATIONS {
        errors.insert(
            "dst",
            format!(
                "too many destinations: {}, max is {MAX_DESTINATIONS}",
                raw_destinations.len()
            ),
        );
    }

    let mut destinations = Vec::with_capacity(raw_destinations.len());
    for (i, raw) in raw_destinations.iter().enumerate() {
        let n = i + 1;
        match Location::parse(raw) {
            Ok(loc) => destinations.push(loc),
            Err(e) => errors.insert(
                format!("dst[{n}]"),
                format!("destination number {n} is invalid: {e}"),
            ),
        }
    }

    match source {
        Some(source) if errors.is_empty() => Ok(RoutesRequest {
            source,
            destinations,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn validate(pairs: &[(&str, &str)]) -> Result<RoutesRequest, ValidationError> {
        validate_routes_query(100, &params(pairs))
    }

    fn failed_fields(pairs: &[(&str, &str)]) -> Vec<String> {
        let err = validate(pairs).unwrap_err();
        err.0.keys().cloned().collect()
    }

    #[test]
    fn display_single_error() {
        let mut err = ValidationError::default();
        err.insert("src", "source location is required");
        assert_eq!(err.to_string(), "src: source location is required");
    }

    #[test]
    fn display_multiple_errors_sorted() {
        let mut err = ValidationError::default();
        err.insert("src", "source location is required");
        err.insert("dst", "destination location is required");
        assert_eq!(
            err.to_string(),
            "dst: destination location is required, src: source location is required"
        );
    }

    #[test]
    fn display_empty() {
        assert_eq!(ValidationError::default().to_string(), "");
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut err = ValidationError::default();
        err.insert("src", "source location is required");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"src": "source location is required"})
        );
    }

    #[test]
    fn valid_single_destination() {
        let req = validate(&[("src", "12.3456,78.9101"), ("dst", "13.1234,79.9101")]).unwrap();
        assert_eq!(req.source.as_str(), "12.3456,78.9101");
        assert_eq!(req.destinations.len(), 1);
        assert_eq!(req.destinations[0].as_str(), "13.1234,79.9101");
    }

    #[test]
    fn valid_multiple_destinations_keep_order() {
        let req = validate(&[
            ("dst", "13.1234,79.9101"),
            ("src", "12.3456,78.9101"),
            ("dst", "14.5678,80.1234"),
        ])
        .unwrap();
        assert_eq!(req.destinations[0].as_str(), "13.1234,79.9101");
        assert_eq!(req.destinations[1].as_str(), "14.5678,80.1234");
    }

    #[test]
    fn missing_fields() {
        assert_eq!(failed_fields(&[("dst", "13.1234,79.9101")]), ["src"]);
        assert_eq!(failed_fields(&[("src", "12.3456,78.9101")]), ["dst"]);
        assert_eq!(failed_fields(&[]), ["dst", "src"]);
        assert_eq!(
            failed_fields(&[("src", ""), ("dst", "13.1234,79.9101")]),
            ["src"]
        );
    }

    #[test]
    fn missing_messages() {
        let err = validate(&[]).unwrap_err();
        assert_eq!(err.get("src"), Some("source location is required"));
        assert_eq!(err.get("dst"), Some("destination location is required"));
    }

    #[test]
    fn invalid_source() {
        for (src, reason) in [
            ("12.3456", "location must be in the format of latitude,longitude"),
            ("12.3456,78.9101,90.1234", "location must be in the format of latitude,longitude"),
            ("invalid,78.9101", "invalid latitude"),
            ("12.3456,invalid", "invalid longitude"),
            ("90.0,78.9101", "latitude out of range"),
            ("-90.0,78.9101", "latitude out of range"),
            ("12.3456,180.0", "longitude out of range"),
            ("12.3456,-180.0", "longitude out of range"),
        ] {
            let err = validate(&[("src", src), ("dst", "13.1234,79.9101")]).unwrap_err();
            assert_eq!(err.len(), 1, "{src}");
            assert_eq!(err.get("src"), Some(reason), "{src}");
        }
    }

    #[test]
    fn invalid_destination_is_numbered() {
        let err = validate(&[("src", "12.3456,78.9101"), ("dst", "13.1234")]).unwrap_err();
        assert_eq!(
            err.get("dst[1]"),
            Some(
                "destination number 1 is invalid: location must be in the format of latitude,longitude"
            )
        );

        for dst in ["invalid,79.9101", "13.1234,invalid", "90.0,79.9101", "13.1234,180.0"] {
            let fields = failed_fields(&[("src", "12.3456,78.9101"), ("dst", dst)]);
            assert_eq!(fields, ["dst[1]"], "{dst}");
        }
    }

    #[test]
    fn every_invalid_destination_reported() {
        assert_eq!(
            failed_fields(&[
                ("src", "12.3456,78.9101"),
                ("dst", "invalid1,79.9101"),
                ("dst", "13.1234,invalid2"),
            ]),
            ["dst[1]", "dst[2]"]
        );
        assert_eq!(
            failed_fields(&[
                ("src", "12.3456,78.9101"),
                ("dst", "13.1234,79.9101"),
                ("dst", "invalid,90.0"),
            ]),
            ["dst[2]"]
        );
    }

    #[test]
    fn too_many_destinations() {
        let mut pairs = vec![("src", "12.3456,78.9101")];
        pairs.extend(std::iter::repeat_n(("dst", "13.1234,79.9101"), MAX_DESTINATIONS + 1));

        let err = validate(&pairs).unwrap_err();
        assert_eq!(err.get("dst"), Some("too many destinations: 81, max is 80"));
    }

    #[test]
    fn exactly_max_destinations_is_accepted() {
        let mut pairs = vec![("src", "12.3456,78.9101")];
        pairs.extend(std::iter::repeat_n(("dst", "13.1234,79.9101"), MAX_DESTINATIONS));

        assert_eq!(validate(&pairs).unwrap().destinations.len(), MAX_DESTINATIONS);
    }

    #[test]
    fn url_too_long() {
        let err = validate_routes_query(
            MAX_URL_CHARS + 1,
            &params(&[("src", "12.3456,78.9101"), ("dst", "13.1234,79.9101")]),
        )
        .unwrap_err();
        assert_eq!(err.get("url"), Some("URL is longer than 2048 characters"));

        assert!(
            validate_routes_query(
                MAX_URL_CHARS,
                &params(&[("src", "12.3456,78.9101"), ("dst", "13.1234,79.9101")]),
            )
            .is_ok()
        );
    }

    #[test]
    fn edge_coordinates_accepted() {
        let req = validate(&[("src", "89.999999,78.9101"), ("dst", "13.1234,79.9101")]).unwrap();
        assert_eq!(req.source.as_str(), "89.999999,78.9101");

        let req = validate(&[("src", "12.3456,179.999999"), ("dst", "13.1234,79.9101")]).unwrap();
        assert_eq!(req.source.as_str(), "12.3456,179.999999");

        let req = validate(&[("src", "-12.3456,-78.9101"), ("dst", "-13.1234,-79.9101")]).unwrap();
        assert_eq!(req.destinations[0].as_str(), "-13.1234,-79.9101");
    }
}
