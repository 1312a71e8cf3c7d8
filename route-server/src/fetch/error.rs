//! Fetcher error types.

use crate::context::CancelReason;

/// Errors from the retrying fetcher.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request context was cancelled or expired.
    #[error("request aborted: {0}")]
    Cancelled(CancelReason),

    /// The last attempt failed at the network level (connect, send, timeout, body read).
    #[error("transport error after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The last attempt returned a status other than 200.
    #[error("unexpected status code {status} after {attempts} attempt(s): {message}")]
    Status {
        status: u16,
        attempts: u32,
        message: String,
    },

    /// A 200 response body was larger than the configured cap.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// A 200 response body did not decode into the requested type.
    #[error("failed to decode response: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// The URL could not be parsed.
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether the request stopped because its context was cancelled or expired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled(_))
    }

    /// Whether the error is a retryable failure that persisted through every attempt.
    pub fn retries_exhausted(&self) -> bool {
        match self {
            FetchError::Transport { .. } => true,
            FetchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Number of attempts made, where the error records it.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            FetchError::Transport { attempts, .. } | FetchError::Status { attempts, .. } => {
                Some(*attempts)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Cancelled(CancelReason::DeadlineExceeded);
        assert_eq!(err.to_string(), "request aborted: context deadline exceeded");

        let err = FetchError::Status {
            status: 503,
            attempts: 3,
            message: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status code 503 after 3 attempt(s): Service Unavailable"
        );

        let err = FetchError::Decode {
            message: "expected value at line 1 column 1".into(),
            body: Some("invalid json{".into()),
        };
        assert!(err.to_string().contains("failed to decode response"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn classification() {
        let server_error = FetchError::Status {
            status: 500,
            attempts: 10,
            message: String::new(),
        };
        assert!(server_error.retries_exhausted());
        assert!(!server_error.is_cancelled());
        assert_eq!(server_error.attempts(), Some(10));

        let not_found = FetchError::Status {
            status: 404,
            attempts: 1,
            message: String::new(),
        };
        assert!(!not_found.retries_exhausted());

        let cancelled = FetchError::Cancelled(CancelReason::Cancelled);
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.retries_exhausted());
        assert_eq!(cancelled.attempts(), None);

        let decode = FetchError::Decode {
            message: String::new(),
            body: None,
        };
        assert!(!decode.retries_exhausted());
        assert!(!decode.is_cancelled());

        let too_large = FetchError::BodyTooLarge { limit: 1024 };
        assert!(!too_large.retries_exhausted());
        assert_eq!(too_large.to_string(), "response body exceeds 1024 bytes");
    }
}
