//! Process configuration read from the environment.

use std::time::Duration;

use crate::fetch::FetchConfig;
use crate::osrm::OsrmConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default budget for a whole `/routes` request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default budget for the health probe.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

/// An environment variable was set to something unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

/// Settings for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Deadline applied to each `/routes` request from arrival
    pub request_timeout: Duration,
    /// Deadline for the upstream probe in `/health`
    pub health_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub osrm: OsrmConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `SERVER_PORT` | 8000 |
    /// | `OSRM_BASE_URL` | `http://router.project-osrm.org` |
    /// | `OSRM_MAX_ATTEMPTS` | 10 |
    /// | `OSRM_RETRY_DELAY_MS` | 100 |
    /// | `OSRM_TIMEOUT_MS` | 3000 |
    /// | `REQUEST_TIMEOUT_SECS` | 30 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut osrm = OsrmConfig::default();
        if let Some(url) = lookup("OSRM_BASE_URL").filter(|u| !u.trim().is_empty()) {
            osrm = osrm.with_base_url(url.trim());
        }

        let defaults = FetchConfig::default();
        let fetch = FetchConfig::new()
            .with_max_attempts(
                parsed(&lookup, "OSRM_MAX_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
            )
            .with_base_delay(
                parsed(&lookup, "OSRM_RETRY_DELAY_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.base_delay),
            )
            .with_timeout(
                parsed(&lookup, "OSRM_TIMEOUT_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.timeout),
            );

        let server = ServerConfig {
            request_timeout: parsed(&lookup, "REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            ..ServerConfig::default()
        };

        // Accept a leading ':' on the port, as in ":8000".
        let port_lookup = |name: &str| {
            lookup(name).map(|v| v.trim().trim_start_matches(':').to_string())
        };

        Ok(Self {
            port: parsed(&port_lookup, "SERVER_PORT")?.unwrap_or(DEFAULT_PORT),
            osrm: osrm.with_fetch(fetch),
            server,
        })
    }
}

/// Parse variable `name` if it is set.
fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    value.trim().parse().map(Some).map_err(|e: T::Err| ConfigError {
        name,
        value: value.clone(),
        reason: e.to_string(),
    })
}
