//! Environment-driven settings.

use std::env;
use std::time::Duration;

use catalog_repository::{IndexConfig, OpenSearchConfig};

use crate::logging::LogFormat;
use crate::ServiceError;

/// Default search backend URL.
const DEFAULT_DATABASE_URL: &str = "http://localhost:9200";

/// Default pause between connection attempts at startup.
const DEFAULT_CONNECT_RETRY_SECS: u64 = 2;

/// Settings for the catalog binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Search backend URL.
    pub database_url: String,
    /// Index holding the products.
    pub index: String,
    /// Wait for a refresh after each write.
    pub refresh_on_write: bool,
    /// Transport timeout for each backend request.
    pub request_timeout: Option<Duration>,
    /// Pause between startup connection attempts.
    pub connect_retry_interval: Duration,
    /// Give up after this many attempts; None retries until interrupted.
    pub connect_max_attempts: Option<u32>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: search backend URL (default: http://localhost:9200)
    /// - `CATALOG_INDEX`: index name (default: catalog)
    /// - `CATALOG_REFRESH_ON_WRITE`: wait for refresh on writes (default: false)
    /// - `CATALOG_REQUEST_TIMEOUT_SECS`: per-request transport timeout (default: none)
    /// - `CATALOG_CONNECT_RETRY_SECS`: pause between connection attempts (default: 2)
    /// - `CATALOG_CONNECT_MAX_ATTEMPTS`: attempt cap (default: retry forever)
    /// - `LOG_FORMAT`: `json` for JSON logs (default: text)
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let index = lookup("CATALOG_INDEX")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| catalog_repository::opensearch::INDEX_NAME.to_string());

        let refresh_on_write = match lookup("CATALOG_REFRESH_ON_WRITE") {
            Some(value) => parse_bool("CATALOG_REFRESH_ON_WRITE", &value)?,
            None => false,
        };

        let request_timeout = lookup("CATALOG_REQUEST_TIMEOUT_SECS")
            .map(|v| parse_positive_secs("CATALOG_REQUEST_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);

        let connect_retry_interval = Duration::from_secs(
            lookup("CATALOG_CONNECT_RETRY_SECS")
                .map(|v| parse_positive_secs("CATALOG_CONNECT_RETRY_SECS", &v))
                .transpose()?
                .unwrap_or(DEFAULT_CONNECT_RETRY_SECS),
        );

        let connect_max_attempts = lookup("CATALOG_CONNECT_MAX_ATTEMPTS")
            .map(|v| parse_number::<u32>("CATALOG_CONNECT_MAX_ATTEMPTS", &v))
            .transpose()?;

        let log_format = LogFormat::from_env_value(lookup("LOG_FORMAT").as_deref());

        Ok(Self {
            database_url,
            index,
            refresh_on_write,
            request_timeout,
            connect_retry_interval,
            connect_max_attempts,
            log_format,
        })
    }

    /// Store settings derived from these settings.
    pub fn store_config(&self) -> OpenSearchConfig {
        OpenSearchConfig {
            index: IndexConfig::new(self.index.clone()),
            refresh_on_write: self.refresh_on_write,
            request_timeout: self.request_timeout,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ServiceError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ServiceError::config(format!(
            "{} must be a boolean, got {:?}",
            key, other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ServiceError> {
    value
        .trim()
        .parse()
        .map_err(|_| ServiceError::config(format!("{} must be a number, got {:?}", key, value)))
}

/// Whole seconds, at least 1.
fn parse_positive_secs(key: &str, value: &str) -> Result<u64, ServiceError> {
    match parse_number::<u64>(key, value)? {
        0 => Err(ServiceError::config(format!("{} must be at least 1", key))),
        secs => Ok(secs),
    }
}
