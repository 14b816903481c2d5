//! Client configuration
//!
//! Values come from environment variables, falling back to defaults.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const BASE_URL_ENV: &str = "ACCOUNT_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "ACCOUNT_API_TIMEOUT_SECS";
pub const AUTH_SCHEME_ENV: &str = "ACCOUNT_AUTH_SCHEME";
pub const SESSION_PATH_ENV: &str = "ACCOUNT_SESSION_PATH";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_AUTH_SCHEME: &str = "Token";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid timeout in ACCOUNT_API_TIMEOUT_SECS: {0:?}")]
    InvalidTimeout(String),
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Cannot resolve {path:?} against the base URL: {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Settings for talking to the account API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root. Its path always ends with `/`.
    pub base_url: Url,
    pub timeout: Duration,
    /// Scheme placed before the token in the `Authorization` header.
    pub auth_scheme: String,
    /// Where the session token is persisted, if anywhere.
    pub session_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Returns a config for `base_url` with every other value defaulted.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            session_path: None,
        })
    }

    /// Reads the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `ACCOUNT_API_BASE_URL` (default `http://localhost:8000`)
    /// - `ACCOUNT_API_TIMEOUT_SECS` (default `30`)
    /// - `ACCOUNT_AUTH_SCHEME` (default `Token`)
    /// - `ACCOUNT_SESSION_PATH` (unset means the session is kept in memory)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(scheme) = std::env::var(AUTH_SCHEME_ENV) {
            let scheme = scheme.trim();
            if !scheme.is_empty() {
                config.auth_scheme = scheme.to_string();
            }
        }

        config.session_path = std::env::var(SESSION_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        #[cfg(feature = "tracing")]
        tracing::debug!(base_url = %config.base_url, "client config loaded");

        Ok(config)
    }

    /// Resolves `path` under the base URL.
    ///
    /// A leading `/` is ignored so a base URL with a path prefix keeps it.
    /// Absolute URLs are returned unchanged.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ConfigError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
