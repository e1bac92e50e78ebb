//! # Configuration
//!
//! Runtime settings for one relay run. [`Config::default`] carries the
//! production defaults; [`Config::from_env`] overrides them from environment
//! variables. A variable that is set but cannot be parsed is an error, never
//! silently replaced by the default.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BASE_API_URL` | `https://nourish.me/api` |
//! | `API_VERSION` | `v1` |
//! | `CLIENT_API_KEY` | unset |
//! | `REQUEST_TIMEOUT_MS` | `5000` |
//! | `MAX_RETRIES` | `1` |
//! | `BACKOFF_FACTOR` | `0.3` |
//! | `RETRY_STATUSES` | `500,502,504` |
//! | `MENU_SNAPSHOT_PATH` | `data/menu.json` |
//! | `RECORD_POLICY` | `abort` |
//! | `SKIP_ABSENT` | `false` |

use crate::clients::ApiVersion;
use crate::framework::RetryPolicy;
use crate::mapping::RecordPolicy;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_API_URL: &str = "https://nourish.me/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/menu.json";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key}='{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub api_version: ApiVersion,
    /// Sent as the `token` header when present.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub snapshot_path: PathBuf,
    pub record_policy: RecordPolicy,
    pub skip_absent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_API_URL.to_string(),
            api_version: ApiVersion::default(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            record_policy: RecordPolicy::default(),
            skip_absent: false,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("BASE_API_URL") {
            config.base_url = non_empty("BASE_API_URL", url)?;
        }
        if let Some(version) = lookup("API_VERSION") {
            config.api_version = parse("API_VERSION", version)?;
        }
        config.api_key = lookup("CLIENT_API_KEY").filter(|key| !key.trim().is_empty());

        if let Some(ms) = lookup("REQUEST_TIMEOUT_MS") {
            let ms: u64 = parse("REQUEST_TIMEOUT_MS", ms)?;
            if ms == 0 {
                return Err(invalid("REQUEST_TIMEOUT_MS", "0", "must be positive"));
            }
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(retries) = lookup("MAX_RETRIES") {
            config.retry.max_retries = parse("MAX_RETRIES", retries)?;
        }
        if let Some(factor) = lookup("BACKOFF_FACTOR") {
            config.retry.backoff_factor = parse_backoff(factor)?;
        }
        if let Some(statuses) = lookup("RETRY_STATUSES") {
            config.retry.retry_statuses = parse_statuses(statuses)?;
        }
        if let Some(path) = lookup("MENU_SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(non_empty("MENU_SNAPSHOT_PATH", path)?);
        }
        if let Some(policy) = lookup("RECORD_POLICY") {
            config.record_policy = parse("RECORD_POLICY", policy)?;
        }
        if let Some(flag) = lookup("SKIP_ABSENT") {
            config.skip_absent = parse_flag("SKIP_ABSENT", flag)?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(key: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(key, &value, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| invalid(key, &value, e))
}

/// Parses a non-negative, finite number of seconds.
pub fn parse_backoff(value: String) -> Result<f64, ConfigError> {
    let factor: f64 = parse("BACKOFF_FACTOR", value.clone())?;
    if !factor.is_finite() || factor < 0.0 {
        return Err(invalid("BACKOFF_FACTOR", &value, "must be a non-negative number"));
    }
    Ok(factor)
}

/// Parses a comma-separated list of HTTP status codes.
pub fn parse_statuses(value: String) -> Result<Vec<u16>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .map(|status| match status.parse::<u16>() {
            Ok(code) if (100..=599).contains(&code) => Ok(code),
            _ => Err(invalid("RETRY_STATUSES", &value, format!("'{status}' is not an HTTP status"))),
        })
        .collect()
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, &value, "expected true or false")),
    }
}
