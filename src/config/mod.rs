//! Application configuration loaded from environment.

use std::net::SocketAddr;
use url::Url;

/// Default mini-apps push endpoint.
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://api.miniapps.run/push";

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address for gateway callbacks (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// Push endpoint the transport sends documents to.
    pub push_endpoint: Url,
    /// Shared key required in `x-app-key` by `POST /api/push`.
    pub app_key: String,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let push_endpoint = std::env::var("PUSH_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_PUSH_ENDPOINT.to_string());
        let push_endpoint =
            Url::parse(&push_endpoint).map_err(|_| ConfigLoadError::InvalidPushEndpoint)?;

        let app_key = std::env::var("APP_KEY").unwrap_or_else(|_| "miniapps_key".to_string());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            push_endpoint,
            app_key,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("Invalid PUSH_ENDPOINT")]
    InvalidPushEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_parses() {
        let url = Url::parse(DEFAULT_PUSH_ENDPOINT).unwrap();
        assert_eq!(url.host_str(), Some("api.miniapps.run"));
        assert_eq!(url.path(), "/push");
    }
}
