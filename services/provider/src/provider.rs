//! Provider: the configured API handle plus the resources it serves.

use std::collections::BTreeMap;
use std::sync::Arc;

use netbox_client::{IpamApi, NetboxClient};
use netbox_plugin::{Resource, ResourceData, ResourceError};
use thiserror::Error;
use tracing::info;

use crate::config::ProviderConfig;
use crate::resources::VlanGroupResource;

/// API handle every resource receives.
pub type IpamHandle = dyn IpamApi;

/// A registered resource type.
pub type DynResource = Arc<dyn Resource<Meta = IpamHandle>>;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown resource type '{0}'")]
    UnknownResource(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// A configured provider.
///
/// Holds one shared, read-only API handle; resource operations borrow it
/// for the duration of a call.
pub struct Provider {
    api: Arc<IpamHandle>,
    resources: BTreeMap<&'static str, DynResource>,
}

impl Provider {
    /// Create a provider around an existing API handle.
    pub fn new(api: Arc<IpamHandle>) -> Self {
        let mut resources: BTreeMap<&'static str, DynResource> = BTreeMap::new();
        let vlan_group: DynResource = Arc::new(VlanGroupResource::new());
        resources.insert(vlan_group.type_name(), vlan_group);

        Self { api, resources }
    }

    /// Build the HTTP client from configuration.
    pub fn configure(config: &ProviderConfig) -> anyhow::Result<Self> {
        let client = NetboxClient::new(&config.client_config())?;
        info!(server_url = %client.base_url(), "Configured NetBox provider");
        Ok(Self::new(Arc::new(client)))
    }

    pub fn api(&self) -> &IpamHandle {
        self.api.as_ref()
    }

    pub fn resource(&self, type_name: &str) -> Result<&DynResource, ProviderError> {
        self.resources
            .get(type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Registered resource type names.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub async fn create(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.create(data, self.api()).await?)
    }

    pub async fn read(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.read(data, self.api()).await?)
    }

    pub async fn update(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.update(data, self.api()).await?)
    }

    pub async fn delete(
        &self,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.delete(data, self.api()).await?)
    }

    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData, ProviderError> {
        Ok(self.resource(type_name)?.import(id, self.api()).await?)
    }
}
