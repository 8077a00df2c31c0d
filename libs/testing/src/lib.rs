//! Test doubles and helpers for the NetBox provider.
//!
//! [`FakeIpam`] keeps VLAN groups in memory and answers the way NetBox does:
//! ids are assigned on create, unknown ids return 404, slugs are unique per
//! scope, and list filtering follows `name__isw`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use netbox_client::{
    ClientError, IpamApi, Paginated, VlanGroup, VlanGroupListParams, WritableVlanGroup,
};
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::debug;

pub use netbox_provider::sweeper::TEST_PREFIX;

/// Unique test object name: `test-<slug>-<6 random chars>`.
pub fn test_name(slug: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{TEST_PREFIX}-{slug}-{}", suffix.to_lowercase())
}

/// A call observed by [`FakeIpam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Create,
    Read(i64),
    Update(i64),
    Delete(i64),
    List,
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: i64,
    groups: BTreeMap<i64, VlanGroup>,
    calls: Vec<Call>,
    fail_with: Option<u16>,
}

/// In-memory implementation of [`IpamApi`].
#[derive(Debug, Default)]
pub struct FakeIpam {
    state: Mutex<FakeState>,
}

impl FakeIpam {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Insert a group directly, as if created out of band.
    pub fn seed(&self, data: &WritableVlanGroup) -> VlanGroup {
        let mut state = self.state();
        let id = state.allocate_id();
        let group = stored_group(id, data);
        state.groups.insert(id, group.clone());
        group
    }

    /// Remove a group without recording a call, as if deleted out of band.
    pub fn remove(&self, id: i64) -> Option<VlanGroup> {
        self.state().groups.remove(&id)
    }

    /// Current server-side copy of a group.
    pub fn get(&self, id: i64) -> Option<VlanGroup> {
        self.state().groups.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state().groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Make every following call fail with `status`.
    pub fn fail_with(&self, status: u16) {
        self.state().fail_with = Some(status);
    }

    pub fn clear_failure(&self) {
        self.state().fail_with = None;
    }
}

impl FakeState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record a call and return the injected failure, if any.
    fn record(&mut self, call: Call) -> Result<(), ClientError> {
        self.calls.push(call);
        match self.fail_with {
            Some(status) => Err(ClientError::api(status, "injected failure")),
            None => Ok(()),
        }
    }

    fn check_writable(
        &self,
        data: &WritableVlanGroup,
        updating: Option<i64>,
    ) -> Result<(), ClientError> {
        if data.name.is_empty() {
            return Err(ClientError::api(400, r#"{"name":["This field is required."]}"#));
        }
        if data.slug.is_empty() {
            return Err(ClientError::api(400, r#"{"slug":["This field is required."]}"#));
        }

        let duplicate = self.groups.values().any(|g| {
            Some(g.id) != updating
                && g.slug.as_deref() == Some(data.slug.as_str())
                && g.scope_type == data.scope_type
                && g.scope_id == data.scope_id
        });
        if duplicate {
            return Err(ClientError::api(
                400,
                r#"{"__all__":["VLAN group with this Scope type, Scope id and Slug already exists."]}"#,
            ));
        }
        Ok(())
    }
}

fn stored_group(id: i64, data: &WritableVlanGroup) -> VlanGroup {
    VlanGroup {
        id,
        url: Some(format!("/api/ipam/vlan-groups/{id}/")),
        display: Some(data.name.clone()),
        name: Some(data.name.clone()),
        slug: Some(data.slug.clone()),
        scope_type: data.scope_type.clone(),
        scope_id: data.scope_id,
        description: Some(data.description.clone()),
    }
}

fn not_found() -> ClientError {
    ClientError::api(404, "Not found.")
}

#[async_trait]
impl IpamApi for FakeIpam {
    async fn vlan_groups_create(
        &self,
        data: &WritableVlanGroup,
    ) -> Result<VlanGroup, ClientError> {
        let mut state = self.state();
        state.record(Call::Create)?;
        state.check_writable(data, None)?;

        let id = state.allocate_id();
        let group = stored_group(id, data);
        state.groups.insert(id, group.clone());
        debug!(id, name = %data.name, "[FAKE] Created VLAN group");
        Ok(group)
    }

    async fn vlan_groups_read(&self, id: i64) -> Result<VlanGroup, ClientError> {
        let mut state = self.state();
        state.record(Call::Read(id))?;
        state.groups.get(&id).cloned().ok_or_else(not_found)
    }

    async fn vlan_groups_update(
        &self,
        id: i64,
        data: &WritableVlanGroup,
    ) -> Result<VlanGroup, ClientError> {
        let mut state = self.state();
        state.record(Call::Update(id))?;
        if !state.groups.contains_key(&id) {
            return Err(not_found());
        }
        state.check_writable(data, Some(id))?;

        let group = stored_group(id, data);
        state.groups.insert(id, group.clone());
        debug!(id, name = %data.name, "[FAKE] Updated VLAN group");
        Ok(group)
    }

    async fn vlan_groups_delete(&self, id: i64) -> Result<(), ClientError> {
        let mut state = self.state();
        state.record(Call::Delete(id))?;
        state.groups.remove(&id).map(|_| ()).ok_or_else(not_found)?;
        debug!(id, "[FAKE] Deleted VLAN group");
        Ok(())
    }

    async fn vlan_groups_list(
        &self,
        params: &VlanGroupListParams,
    ) -> Result<Paginated<VlanGroup>, ClientError> {
        let mut state = self.state();
        state.record(Call::List)?;

        let prefix = params.name_prefix.as_deref().map(str::to_lowercase);
        let matching: Vec<VlanGroup> = state
            .groups
            .values()
            .filter(|g| match (&prefix, &g.name) {
                (Some(prefix), Some(name)) => name.to_lowercase().starts_with(prefix.as_str()),
                (Some(_), None) => false,
                (None, _) => true,
            })
            .cloned()
            .collect();

        let offset = params.offset.unwrap_or(0) as usize;
        let limit = params.limit.unwrap_or(50) as usize;
        let results: Vec<VlanGroup> = matching.iter().skip(offset).take(limit).cloned().collect();
        let next = (offset + limit < matching.len())
            .then(|| format!("/api/ipam/vlan-groups/?offset={}", offset + limit));

        Ok(Paginated {
            count: matching.len() as u64,
            next,
            previous: None,
            results,
        })
    }
}
