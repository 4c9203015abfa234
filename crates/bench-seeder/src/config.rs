//! Seeder configuration.
//!
//! Built once at entry, from the environment or explicitly, and handed to
//! [`HttpCrmClient`](crate::client::HttpCrmClient) and
//! [`Seeder`](crate::seeder::Seeder).

use mcp_bench_core::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the CRM API credential.
pub const API_KEY_ENV: &str = "ATTIO_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "ATTIO_BASE_URL";

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.attio.com/v2";

/// Pause before every API call.
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_millis(150);

/// Per-call network timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the record mapping is written unless overridden.
pub const DEFAULT_MAPPING_PATH: &str = "seed-record-mapping.json";

/// Runtime settings for a seeding run.
///
/// The credential is held as a [`SecretString`] and never appears in `Debug`
/// output or logs.
///
/// # Examples
///
/// ```
/// use mcp_bench_seeder::config::{DEFAULT_BASE_URL, SeederConfig};
/// use std::time::Duration;
///
/// let config = SeederConfig::new("sk-test")
///     .with_rate_limit_delay(Duration::ZERO);
///
/// assert_eq!(config.base_url, DEFAULT_BASE_URL);
/// assert!(!format!("{config:?}").contains("sk-test"));
/// ```
#[derive(Debug)]
pub struct SeederConfig {
    /// Bearer credential
    pub api_key: SecretString,
    /// API base URL without a trailing slash
    pub base_url: String,
    /// Delay applied before every call
    pub rate_limit_delay: Duration,
    /// Timeout applied to every call
    pub request_timeout: Duration,
    /// Destination of the record mapping JSON
    pub mapping_path: PathBuf,
}

impl SeederConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            mapping_path: PathBuf::from(DEFAULT_MAPPING_PATH),
        }
    }

    /// Reads [`API_KEY_ENV`] and, if set, [`BASE_URL_ENV`] from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the credential is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the credential is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::ConfigError {
                message: format!("{API_KEY_ENV} is not set"),
            })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the per-call delay.
    #[must_use]
    pub const fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Overrides the per-call timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Overrides the mapping destination.
    #[must_use]
    pub fn with_mapping_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_path = path.into();
        self
    }

    /// Credential for the `Authorization` header.
    pub(crate) fn bearer_token(&self) -> &str {
        self.api_key.expose_secret()
    }
}
