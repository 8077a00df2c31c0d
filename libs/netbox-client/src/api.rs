//! The IPAM operations the provider depends on.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::models::{Paginated, VlanGroup, VlanGroupListParams, WritableVlanGroup};

/// VLAN group operations of the NetBox IPAM API.
///
/// Implemented by [`crate::NetboxClient`] over HTTP and by in-memory fakes in
/// tests. Handles are shared read-only across concurrent resource operations.
#[async_trait]
pub trait IpamApi: Send + Sync {
    /// `POST /api/ipam/vlan-groups/`
    async fn vlan_groups_create(&self, data: &WritableVlanGroup)
        -> Result<VlanGroup, ClientError>;

    /// `GET /api/ipam/vlan-groups/{id}/`
    async fn vlan_groups_read(&self, id: i64) -> Result<VlanGroup, ClientError>;

    /// `PUT /api/ipam/vlan-groups/{id}/`
    async fn vlan_groups_update(
        &self,
        id: i64,
        data: &WritableVlanGroup,
    ) -> Result<VlanGroup, ClientError>;

    /// `DELETE /api/ipam/vlan-groups/{id}/`
    async fn vlan_groups_delete(&self, id: i64) -> Result<(), ClientError>;

    /// `GET /api/ipam/vlan-groups/`
    async fn vlan_groups_list(
        &self,
        params: &VlanGroupListParams,
    ) -> Result<Paginated<VlanGroup>, ClientError>;
}
