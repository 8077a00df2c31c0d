//! Provider configuration.
//!
//! Read from `NETBOX_*` environment variables:
//! - `NETBOX_SERVER_URL` (required)
//! - `NETBOX_API_TOKEN` (required)
//! - `NETBOX_ALLOW_INSECURE_HTTPS` (default: false)
//! - `NETBOX_REQUEST_TIMEOUT` in seconds (default: 10)
//! - `NETBOX_LOG_LEVEL` (default: info)

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use netbox_client::ClientConfig;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct ProviderConfig {
    pub server_url: String,
    pub api_token: String,
    pub allow_insecure_https: bool,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let server_url = lookup("NETBOX_SERVER_URL")
            .filter(|v| !v.is_empty())
            .context("NETBOX_SERVER_URL must be set")?;

        let api_token = lookup("NETBOX_API_TOKEN")
            .filter(|v| !v.is_empty())
            .context("NETBOX_API_TOKEN must be set")?;

        let allow_insecure_https = lookup("NETBOX_ALLOW_INSECURE_HTTPS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let request_timeout = match lookup("NETBOX_REQUEST_TIMEOUT") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("invalid NETBOX_REQUEST_TIMEOUT '{v}'"))?,
            ),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let log_level = lookup("NETBOX_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            server_url,
            api_token,
            allow_insecure_https,
            request_timeout,
            log_level,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url.clone(),
            api_token: self.api_token.clone(),
            allow_insecure_https: self.allow_insecure_https,
            request_timeout: self.request_timeout,
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server_url", &self.server_url)
            .field("api_token", &"<redacted>")
            .field("allow_insecure_https", &self.allow_insecure_https)
            .field("request_timeout", &self.request_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}
