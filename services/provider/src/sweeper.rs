//! Cleanup of VLAN groups left behind by test runs.

use netbox_client::{ClientError, VlanGroup, VlanGroupListParams};
use tracing::{debug, info};

use crate::provider::IpamHandle;

/// Name prefix shared by every test-created object. The sweeper deletes
/// anything starting with it.
pub const TEST_PREFIX: &str = "test";

const PAGE_SIZE: u32 = 100;

/// All VLAN groups whose name starts with `prefix`.
///
/// Pages through the server-side `name__isw` filter, then re-checks the
/// prefix case-sensitively.
pub async fn find_vlan_groups(
    api: &IpamHandle,
    prefix: &str,
) -> Result<Vec<VlanGroup>, ClientError> {
    let mut found = Vec::new();
    let mut offset = 0;

    loop {
        let params = VlanGroupListParams::default()
            .with_name_prefix(prefix)
            .with_limit(PAGE_SIZE)
            .with_offset(offset);
        let page = api.vlan_groups_list(&params).await?;
        let page_len = page.results.len() as u32;

        found.extend(
            page.results
                .into_iter()
                .filter(|g| g.name.as_deref().is_some_and(|n| n.starts_with(prefix))),
        );

        if page.next.is_none() || page_len == 0 {
            break;
        }
        offset += page_len;
    }

    Ok(found)
}

/// Delete every VLAN group whose name starts with `prefix`.
///
/// Stops at the first failed delete. Returns the number deleted.
pub async fn sweep_vlan_groups(api: &IpamHandle, prefix: &str) -> Result<usize, ClientError> {
    let groups = find_vlan_groups(api, prefix).await?;

    for group in &groups {
        api.vlan_groups_delete(group.id).await?;
        debug!(id = group.id, name = ?group.name, "Deleted a VLAN group");
    }

    info!(prefix, deleted = groups.len(), "Swept VLAN groups");
    Ok(groups.len())
}
