//! Edge process configuration parsed from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::http::Uri;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_TARGET: &str = "http://trego-backend:8080";
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Name of the SPA entry document inside the static root.
pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` is set but is not a valid TCP port.
    #[error("invalid PORT '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),

    /// `API_TARGET` is not an absolute http(s) origin.
    #[error("invalid API_TARGET '{value}': {reason}")]
    InvalidApiTarget { value: String, reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    /// Total ceiling for one upstream exchange, response body included.
    pub request: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConfig {
    pub port: u16,
    /// Upstream origin without a trailing slash, e.g. `http://trego-backend:8080`.
    pub api_target: String,
    pub static_dir: PathBuf,
    pub timeouts: UpstreamTimeouts,
    pub log_format: LogFormat,
}

impl EdgeConfig {
    /// Build typed edge config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_TARGET`: default `http://trego-backend:8080`
    /// - `STATIC_DIR`: default `dist`
    /// - `UPSTREAM_TIMEOUT_SECS`: default 30
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 5
    /// - `LOG_FORMAT`: `text` (default) or `json`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `API_TARGET` is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EdgeConfig::from_env`] but reads values through `lookup`.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match non_empty(lookup("PORT")) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        let api_target = parse_api_target(non_empty(lookup("API_TARGET")).as_deref().unwrap_or(DEFAULT_API_TARGET))?;
        let static_dir = non_empty(lookup("STATIC_DIR")).map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        let timeouts = UpstreamTimeouts {
            request: Duration::from_secs(parse_secs(lookup("UPSTREAM_TIMEOUT_SECS"), DEFAULT_UPSTREAM_TIMEOUT_SECS)),
            connect: Duration::from_secs(parse_secs(
                lookup("UPSTREAM_CONNECT_TIMEOUT_SECS"),
                DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS,
            )),
        };
        let log_format = match lookup("LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self { port, api_target, static_dir, timeouts, log_format })
    }

    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(INDEX_DOCUMENT)
    }

    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_owned())),
    }
}

fn parse_secs(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

fn parse_api_target(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let invalid = |reason| ConfigError::InvalidApiTarget { value: raw.to_owned(), reason };

    let uri: Uri = trimmed.parse().map_err(|_| invalid("not a valid URI"))?;
    match uri.scheme_str() {
        Some("http" | "https") => {}
        _ => return Err(invalid("scheme must be http or https")),
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host"));
    }
    if uri.path_and_query().is_some_and(|pq| pq.as_str() != "/" && !pq.as_str().is_empty()) {
        return Err(invalid("must be an origin without a path"));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
