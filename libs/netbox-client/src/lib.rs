//! NetBox IPAM client.
//!
//! Covers the `ipam/vlan-groups` collection: typed models, the [`IpamApi`]
//! trait consumed by the provider, and [`NetboxClient`], its HTTP
//! implementation.

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::IpamApi;
pub use client::{ClientConfig, NetboxClient};
pub use error::ClientError;
pub use models::{Paginated, VlanGroup, VlanGroupListParams, WritableVlanGroup};
