//! Error types for NetBox API calls.

use thiserror::Error;

/// Errors returned by the IPAM client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("NetBox API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected model.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The configured server URL cannot be used.
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an API error from response details.
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the remote object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
