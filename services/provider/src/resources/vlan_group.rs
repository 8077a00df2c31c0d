//! `netbox_vlan_group` resource.
//!
//! Manages one NetBox VLAN group. Attribute data is converted to a typed
//! [`VlanGroupRecord`] on the way in and copied back from the API response on
//! the way out.

use async_trait::async_trait;
use netbox_client::{VlanGroup, WritableVlanGroup};
use netbox_plugin::{Attribute, Resource, ResourceData, ResourceError, Schema, Validator};
use tracing::{debug, info, warn};

use crate::provider::IpamHandle;

pub const TYPE_NAME: &str = "netbox_vlan_group";

const NAME: &str = "name";
const SLUG: &str = "slug";
const SCOPE_ID: &str = "scope_id";
const SCOPE_TYPE: &str = "scope_type";
const DESCRIPTION: &str = "description";

const SLUG_MAX_LEN: usize = 30;

/// Typed view of a VLAN group's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanGroupRecord {
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub scope_id: Option<i64>,
    pub scope_type: Option<String>,
    pub description: String,
}

impl VlanGroupRecord {
    /// Read attributes from resource data.
    ///
    /// A slug that was not explicitly set defaults to the name. Zero or empty
    /// scope values count as unset.
    pub fn from_data(data: &ResourceData) -> Result<Self, ResourceError> {
        let id = if data.has_id() {
            Some(parse_id(data)?)
        } else {
            None
        };

        let name = data.get_str(NAME)?.unwrap_or_default().to_string();
        let slug = match data.get_str(SLUG)? {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => name.clone(),
        };

        Ok(Self {
            id,
            name,
            slug,
            scope_id: data.get_i64(SCOPE_ID)?.filter(|id| *id != 0),
            scope_type: data
                .get_str(SCOPE_TYPE)?
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            description: data.get_str(DESCRIPTION)?.unwrap_or_default().to_string(),
        })
    }

    pub fn to_writable(&self) -> WritableVlanGroup {
        WritableVlanGroup {
            name: self.name.clone(),
            slug: self.slug.clone(),
            scope_type: self.scope_type.clone(),
            scope_id: self.scope_id,
            description: self.description.clone(),
        }
    }

    /// Copy server values into resource data.
    ///
    /// Only non-empty values are written; a field the server leaves empty
    /// keeps its local value.
    pub fn apply_remote(group: &VlanGroup, data: &mut ResourceData) {
        if let Some(name) = &group.name {
            data.set(NAME, name.as_str());
        }
        if let Some(scope_id) = group.scope_id {
            data.set(SCOPE_ID, scope_id);
        }
        if let Some(scope_type) = group.scope_type.as_deref().filter(|t| !t.is_empty()) {
            data.set(SCOPE_TYPE, scope_type);
        }
        if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
            data.set(DESCRIPTION, description);
        }
        if let Some(slug) = &group.slug {
            data.set(SLUG, slug.as_str());
        }
    }
}

fn parse_id(data: &ResourceData) -> Result<i64, ResourceError> {
    data.id()
        .parse()
        .map_err(|_| ResourceError::InvalidId(data.id().to_string()))
}

/// The `netbox_vlan_group` resource type.
#[derive(Debug, Clone)]
pub struct VlanGroupResource {
    schema: Schema,
}

impl VlanGroupResource {
    pub fn new() -> Self {
        let schema = Schema::new()
            .with_attribute(NAME, Attribute::required_string())
            .with_attribute(
                SLUG,
                Attribute::optional_string()
                    .computed()
                    .with_description("Defaults to the name when not set.")
                    .with_validator(Validator::string_len_between(0, SLUG_MAX_LEN)),
            )
            .with_attribute(SCOPE_ID, Attribute::optional_int())
            .with_attribute(SCOPE_TYPE, Attribute::optional_string())
            .with_attribute(DESCRIPTION, Attribute::optional_string());

        Self { schema }
    }
}

impl Default for VlanGroupResource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resource for VlanGroupResource {
    type Meta = IpamHandle;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn create(
        &self,
        data: &mut ResourceData,
        api: &IpamHandle,
    ) -> Result<(), ResourceError> {
        self.validate(data)?;
        let record = VlanGroupRecord::from_data(data)?;
        data.set(SLUG, record.slug.as_str());

        debug!(name = %record.name, slug = %record.slug, "Creating VLAN group");
        let group = api
            .vlan_groups_create(&record.to_writable())
            .await
            .map_err(ResourceError::remote)?;

        data.set_id(group.id.to_string());
        VlanGroupRecord::apply_remote(&group, data);

        info!(id = group.id, name = %record.name, "Created VLAN group");
        Ok(())
    }

    async fn read(
        &self,
        data: &mut ResourceData,
        api: &IpamHandle,
    ) -> Result<(), ResourceError> {
        let id = parse_id(data)?;

        match api.vlan_groups_read(id).await {
            Ok(group) => {
                VlanGroupRecord::apply_remote(&group, data);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                warn!(id, "VLAN group no longer exists, removing from state");
                data.clear_id();
                Ok(())
            }
            Err(err) => Err(ResourceError::remote(err)),
        }
    }

    async fn update(
        &self,
        data: &mut ResourceData,
        api: &IpamHandle,
    ) -> Result<(), ResourceError> {
        self.validate(data)?;
        let id = parse_id(data)?;
        let record = VlanGroupRecord::from_data(data)?;
        data.set(SLUG, record.slug.as_str());

        debug!(id, name = %record.name, slug = %record.slug, "Updating VLAN group");
        api.vlan_groups_update(id, &record.to_writable())
            .await
            .map_err(ResourceError::remote)?;

        self.read(data, api).await
    }

    async fn delete(
        &self,
        data: &mut ResourceData,
        api: &IpamHandle,
    ) -> Result<(), ResourceError> {
        let id = parse_id(data)?;

        api.vlan_groups_delete(id)
            .await
            .map_err(ResourceError::remote)?;

        info!(id, "Deleted VLAN group");
        data.clear_id();
        Ok(())
    }
}
