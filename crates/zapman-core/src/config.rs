//! Configuration management for Zapman tools.
//!
//! All configuration is driven by environment variables. A `.env` file in the
//! working directory is loaded first when present, so the variables the
//! dashboard hands out can be dropped into a file instead of the shell.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ZapmanError, ZapmanResult};
use crate::types::Credentials;

/// Global configuration for Zapman tools.
#[derive(Clone)]
pub struct ZapmanConfig {
    /// Client ID (`CLIENT_ID`).
    pub client_id: String,
    /// Client secret (`CLIENT_SECRET`).
    pub client_secret: String,
    /// API base URL without a trailing slash (`API_ENDPOINT`).
    pub api_endpoint: String,
    /// Bind address for the proxy server (`PROXY_LISTEN`).
    pub proxy_listen: String,
    /// Log level (`LOG_LEVEL`).
    pub log_level: String,
    /// Outbound request timeout in seconds (`REQUEST_TIMEOUT_SECS`).
    pub request_timeout_secs: u64,
}

impl Default for ZapmanConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_endpoint: String::new(),
            proxy_listen: "0.0.0.0:80".to_owned(),
            log_level: "info".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for ZapmanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZapmanConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("proxy_listen", &self.proxy_listen)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ZapmanConfig {
    /// Load `.env` (if present) and then read configuration from the environment.
    #[must_use]
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => debug!(error = %e, "ignoring unreadable .env file"),
        }
        Self::from_env()
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones. A timeout that is not
    /// a positive integer is logged and the default kept.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("CLIENT_ID") {
            config.client_id = v;
        }
        if let Some(v) = get("CLIENT_SECRET") {
            config.client_secret = v;
        }
        if let Some(v) = get("API_ENDPOINT") {
            config.api_endpoint = v.trim_end_matches('/').to_owned();
        }
        if let Some(v) = get("PROXY_LISTEN") {
            config.proxy_listen = v;
        }
        if let Some(v) = get("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
                _ => warn!(
                    value = %v,
                    default = config.request_timeout_secs,
                    "REQUEST_TIMEOUT_SECS must be a positive number of seconds, using default"
                ),
            }
        }

        config
    }

    /// Override the API endpoint.
    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into().trim_end_matches('/').to_owned();
        self
    }

    /// Validated credentials, checked in the order the variables are documented.
    pub fn credentials(&self) -> ZapmanResult<Credentials> {
        if self.client_id.is_empty() {
            return Err(ZapmanError::MissingEnv("CLIENT_ID"));
        }
        if self.client_secret.is_empty() {
            return Err(ZapmanError::MissingEnv("CLIENT_SECRET"));
        }
        Credentials::new(self.client_id.clone(), self.client_secret.clone())
    }

    /// The API endpoint, required for anything that goes over the network.
    pub fn api_endpoint(&self) -> ZapmanResult<&str> {
        if self.api_endpoint.is_empty() {
            return Err(ZapmanError::MissingEnv("API_ENDPOINT"));
        }
        Ok(&self.api_endpoint)
    }

    /// The outbound request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
