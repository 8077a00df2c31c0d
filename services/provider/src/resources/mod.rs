//! Resource implementations.

pub mod vlan_group;

pub use vlan_group::{VlanGroupRecord, VlanGroupResource};
