//! Relay configuration, read from the environment.
//!
//! `main` loads a `.env` file first, so every key can also live there.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;
use validator::Validate;

use crate::error::AppError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Bunyan JSON records
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct RelayConfig {
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// `development` or `production`
    pub environment: String,
    /// Base URL of the classification pipeline.
    #[validate(url)]
    pub upstream_base_url: String,
    #[validate(length(min = 1))]
    pub upstream_classify_path: String,
    /// Sent as the `accessToken` header when set.
    pub upstream_access_token: Option<String>,
    #[validate(range(min = 1, max = 300))]
    pub upstream_timeout_secs: u64,
    /// Requests allowed per sender within the window.
    #[validate(range(min = 1))]
    pub rate_limit_requests: usize,
    #[validate(range(min = 1))]
    pub rate_limit_window_secs: u64,
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
            upstream_base_url: "http://127.0.0.1:5002".to_string(),
            upstream_classify_path: "/classify".to_string(),
            upstream_access_token: None,
            upstream_timeout_secs: 30,
            rate_limit_requests: 30,
            rate_limit_window_secs: 60,
            log_format: LogFormat::Pretty,
        }
    }
}

impl RelayConfig {
    /// Builds the configuration from environment variables, falling back to
    /// defaults for unset keys, and validates the result.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            host: env::var("RELAY_HOST").unwrap_or(defaults.host),
            port: parse_var("RELAY_PORT", defaults.port)?,
            environment: env::var("RELAY_ENVIRONMENT").unwrap_or(defaults.environment),
            upstream_base_url: env::var("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            upstream_classify_path: env::var("UPSTREAM_CLASSIFY_PATH")
                .unwrap_or(defaults.upstream_classify_path),
            upstream_access_token: env::var("UPSTREAM_ACCESS_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs)?,
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window_secs: parse_var(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            log_format: match env::var("LOG_FORMAT") {
                Ok(raw) => raw.parse()?,
                Err(_) => defaults.log_format,
            },
        };

        config
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Full URL of the pipeline's classify endpoint.
    pub fn classify_url(&self) -> Result<Url, AppError> {
        self.upstream_url(&self.upstream_classify_path)
    }

    /// Full URL of the pipeline's health endpoint.
    pub fn health_url(&self) -> Result<Url, AppError> {
        self.upstream_url("health")
    }

    /// `path` under the base URL, keeping any path prefix the base carries.
    fn upstream_url(&self, path: &str) -> Result<Url, AppError> {
        let mut base = Url::parse(&self.upstream_base_url)?;
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
