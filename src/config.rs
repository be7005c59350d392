//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_STATE_PATH: &str = ".cleanfeed/state.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOAST_MILLIS: u64 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL every API path is joined onto, without a trailing `/`.
    pub api_url: String,
    /// File backing the durable key-value store.
    pub state_path: PathBuf,
    pub timeouts: Timeouts,
    /// How long a notification stays visible.
    pub toast_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            toast_ttl: Duration::from_millis(DEFAULT_TOAST_MILLIS),
        }
    }
}

impl Config {
    /// Build typed config from process environment variables.
    ///
    /// Optional:
    /// - `CLEANFEED_API_URL`: default `http://localhost:3001`
    /// - `CLEANFEED_STATE_PATH`: default `.cleanfeed/state.json`
    /// - `CLEANFEED_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CLEANFEED_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CLEANFEED_TOAST_MILLIS`: default 3000
    ///
    /// # Errors
    ///
    /// Returns an error if `CLEANFEED_API_URL` is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], with command-line values taking priority.
    /// An overridden `CLEANFEED_API_URL` is never parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective API URL is not an absolute http(s) URL.
    pub fn from_env_with(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup_with(|key| std::env::var(key).ok(), overrides)
    }

    /// [`Config::from_lookup`] with `overrides` layered on top.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env_with`].
    pub fn from_lookup_with<F>(lookup: F, overrides: &Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_lookup(|key| match (key, &overrides.api_url) {
            ("CLEANFEED_API_URL", Some(url)) => Some(url.clone()),
            _ => lookup(key),
        })?;
        if let Some(path) = &overrides.state_path {
            config.state_path.clone_from(path);
        }
        Ok(config)
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("CLEANFEED_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => normalize_api_url(&raw)?,
            None => DEFAULT_API_URL.to_owned(),
        };
        let state_path = lookup("CLEANFEED_STATE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse(&lookup, "CLEANFEED_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse(&lookup, "CLEANFEED_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let toast_ttl = Duration::from_millis(env_parse(&lookup, "CLEANFEED_TOAST_MILLIS", DEFAULT_TOAST_MILLIS));

        Ok(Self { api_url, state_path, timeouts, toast_ttl })
    }
}

/// Validate an API base URL and strip trailing slashes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiUrl`] for unparseable or non-http(s) URLs.
pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidApiUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_owned())
}

fn env_parse<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
