//! NetBox provider.
//!
//! Implements the `netbox_vlan_group` resource on top of the NetBox IPAM
//! API. The host framework drives the lifecycle; this crate supplies:
//!
//! - [`resources::VlanGroupResource`]: schema and create/read/update/delete
//! - [`provider::Provider`]: configuration and the resource registry
//! - [`sweeper`]: cleanup of test-created VLAN groups

pub mod config;
pub mod logging;
pub mod provider;
pub mod resources;
pub mod sweeper;

pub use config::ProviderConfig;
pub use provider::{IpamHandle, Provider, ProviderError};
