//! Retrying JSON-over-HTTP GET client.

use std::fmt;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::context::RequestContext;

use super::config::FetchConfig;
use super::error::FetchError;

/// Idle connections kept open per upstream host.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// How long an idle pooled connection is kept.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Longest body excerpt carried in errors and logs.
const BODY_EXCERPT_CHARS: usize = 500;

/// Outcome of a single attempt.
///
/// The response is consumed inside [`Fetcher::attempt`], so by the time an
/// outcome exists its connection has already been released.
enum Attempt {
    /// Status 200; the full body.
    Succeeded(Vec<u8>),

    /// Worth another try.
    RetryableFailed(RetryCause),

    /// Non-200 status below 500.
    TerminalFailed { status: StatusCode, message: String },

    /// Status 200 with a body over the size cap.
    TooLarge,
}

/// Why an attempt is worth retrying.
enum RetryCause {
    Status { status: StatusCode, message: String },
    Transport(reqwest::Error),
}

impl RetryCause {
    fn into_error(self, attempts: u32) -> FetchError {
        match self {
            RetryCause::Status { status, message } => FetchError::Status {
                status: status.as_u16(),
                attempts,
                message,
            },
            RetryCause::Transport(source) => FetchError::Transport { attempts, source },
        }
    }
}

impl fmt::Display for RetryCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryCause::Status { status, .. } => write!(f, "retryable status code: {status}"),
            RetryCause::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

/// HTTP GET client that decodes JSON and retries server-side failures.
///
/// A failure is retried when the upstream answers with a 5xx status or the
/// request fails at the network level. Everything else ends the call on the
/// first occurrence. Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http, config })
    }

    /// GET `url` and decode the 200 response body as `T`.
    ///
    /// Retries 5xx responses and transport failures up to the configured
    /// number of attempts with exponential back-off. Returns
    /// [`FetchError::Cancelled`] as soon as `ctx` is cancelled or expires,
    /// including while waiting between attempts.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        url: &str,
    ) -> Result<T, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let body = self.get_with_retry(ctx, &parsed).await?;

        serde_json::from_slice(&body).map_err(|e| {
            let excerpt = excerpt(&body);
            error!(%url, error = %e, body = %excerpt, "failed to decode response");
            FetchError::Decode {
                message: e.to_string(),
                body: Some(excerpt),
            }
        })
    }

    /// Run attempts until one succeeds, one fails terminally, the attempts
    /// run out, or `ctx` is done.
    async fn get_with_retry(
        &self,
        ctx: &RequestContext,
        url: &Url,
    ) -> Result<Vec<u8>, FetchError> {
        let max_attempts = self.config.attempts();
        let mut attempt = 1;

        loop {
            ctx.check().map_err(FetchError::Cancelled)?;
            debug!(%url, attempt, "sending request");

            let outcome = tokio::select! {
                biased;
                reason = ctx.done() => return Err(FetchError::Cancelled(reason)),
                outcome = self.attempt(url) => outcome,
            };

            let cause = match outcome {
                Attempt::Succeeded(body) => return Ok(body),
                Attempt::TerminalFailed { status, message } => {
                    error!(%url, %status, "request failed");
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        attempts: attempt,
                        message,
                    });
                }
                Attempt::TooLarge => {
                    let limit = self.config.max_body_bytes;
                    error!(%url, limit, "response body too large");
                    return Err(FetchError::BodyTooLarge { limit });
                }
                Attempt::RetryableFailed(cause) => cause,
            };

            if attempt >= max_attempts {
                error!(%url, attempts = attempt, "giving up: {cause}");
                return Err(cause.into_error(attempt));
            }

            let delay = self.config.delay_after(attempt);
            warn!(%url, attempt, ?delay, "retrying: {cause}");

            tokio::select! {
                biased;
                reason = ctx.done() => return Err(FetchError::Cancelled(reason)),
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// One GET round-trip. The response never outlives this call.
    async fn attempt(&self, url: &Url) -> Attempt {
        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::RetryableFailed(RetryCause::Transport(e)),
        };

        let status = response.status();

        if status.is_server_error() {
            // Reading drains the body so the connection can go back to the pool.
            let message = self.error_message(response).await;
            return Attempt::RetryableFailed(RetryCause::Status { status, message });
        }

        if status != StatusCode::OK {
            let message = self.error_message(response).await;
            return Attempt::TerminalFailed { status, message };
        }

        match read_capped(response, self.config.max_body_bytes).await {
            Ok(Some(body)) => Attempt::Succeeded(body),
            Ok(None) => Attempt::TooLarge,
            Err(e) => Attempt::RetryableFailed(RetryCause::Transport(e)),
        }
    }

    /// Excerpt of an error body; empty if it cannot be read or is over the cap.
    async fn error_message(&self, response: reqwest::Response) -> String {
        match read_capped(response, self.config.max_body_bytes).await {
            Ok(Some(body)) => excerpt(&body),
            _ => String::new(),
        }
    }
}

/// Read the body if it fits in `limit` bytes; `Ok(None)` if it does not.
///
/// An oversized declared length is rejected before reading, and a streamed
/// body stops being read as soon as it passes the limit.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Option<Vec<u8>>, reqwest::Error> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Ok(None);
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Ok(None);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Some(body))
}

fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_EXCERPT_CHARS)
        .collect()
}
