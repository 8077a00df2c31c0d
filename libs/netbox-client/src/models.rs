//! Request and response models for the `ipam/vlan-groups` endpoint.

use serde::{Deserialize, Serialize};

/// Writable VLAN group payload, sent on create and full update.
///
/// `scope_type` and `scope_id` serialize as `null` when unset so a PUT clears
/// them; `description` is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritableVlanGroup {
    pub name: String,
    pub slug: String,
    pub scope_type: Option<String>,
    pub scope_id: Option<i64>,
    #[serde(default)]
    pub description: String,
}

/// VLAN group as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanGroup {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub scope_type: Option<String>,

    #[serde(default)]
    pub scope_id: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Paginated list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Filters for listing VLAN groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanGroupListParams {
    /// Case-insensitive name prefix (`name__isw`).
    pub name_prefix: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl VlanGroupListParams {
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render as query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(prefix) = &self.name_prefix {
            pairs.push(("name__isw", prefix.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}
