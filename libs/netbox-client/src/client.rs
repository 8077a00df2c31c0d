//! HTTP client for the NetBox REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::api::IpamApi;
use crate::error::ClientError;
use crate::models::{Paginated, VlanGroup, VlanGroupListParams, WritableVlanGroup};

const VLAN_GROUPS_PATH: &str = "/api/ipam/vlan-groups/";

/// Connection settings for [`NetboxClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the NetBox instance, e.g. `https://netbox.example.com`.
    pub server_url: String,

    /// API token sent as `Authorization: Token <token>`.
    pub api_token: String,

    /// Skip TLS certificate verification.
    pub allow_insecure_https: bool,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_token: api_token.into(),
            allow_insecure_https: false,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// API client for the NetBox IPAM endpoints.
#[derive(Debug, Clone)]
pub struct NetboxClient {
    client: reqwest::Client,
    base_url: String,
}

impl NetboxClient {
    /// Create a new client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.server_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.server_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(&format!("Token {}", config.api_token))
            .map_err(|_| ClientError::Config("invalid API token format".to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.allow_insecure_https)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn vlan_group_url(&self, id: i64) -> String {
        self.url(&format!("{VLAN_GROUPS_PATH}{id}/"))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn write<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: String,
        body: &B,
    ) -> Result<VlanGroup, ClientError> {
        debug!(method = %method, url = %url, "NetBox request");
        self.send_json(self.client.request(method, url).json(body))
            .await
    }

    /// Turn an error response into a [`ClientError::Api`].
    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        // NetBox reports `{"detail": "..."}` for most errors and a field map
        // for validation failures.
        let detail = match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(ApiErrorResponse {
                detail: Some(detail),
            }) => detail,
            _ if !text.trim().is_empty() => text.trim().to_string(),
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        debug!(status = status.as_u16(), detail = %detail, "NetBox request failed");
        ClientError::api(status.as_u16(), detail)
    }
}

#[async_trait]
impl IpamApi for NetboxClient {
    async fn vlan_groups_create(
        &self,
        data: &WritableVlanGroup,
    ) -> Result<VlanGroup, ClientError> {
        self.write(reqwest::Method::POST, self.url(VLAN_GROUPS_PATH), data)
            .await
    }

    async fn vlan_groups_read(&self, id: i64) -> Result<VlanGroup, ClientError> {
        let url = self.vlan_group_url(id);
        debug!(url = %url, "NetBox request");
        self.send_json(self.client.get(url)).await
    }

    async fn vlan_groups_update(
        &self,
        id: i64,
        data: &WritableVlanGroup,
    ) -> Result<VlanGroup, ClientError> {
        self.write(reqwest::Method::PUT, self.vlan_group_url(id), data)
            .await
    }

    async fn vlan_groups_delete(&self, id: i64) -> Result<(), ClientError> {
        let url = self.vlan_group_url(id);
        debug!(url = %url, "NetBox delete");
        let response = self.client.delete(url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn vlan_groups_list(
        &self,
        params: &VlanGroupListParams,
    ) -> Result<Paginated<VlanGroup>, ClientError> {
        let url = self.url(VLAN_GROUPS_PATH);
        debug!(url = %url, ?params, "NetBox list");
        self.send_json(self.client.get(url).query(&params.query_pairs()))
            .await
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}
