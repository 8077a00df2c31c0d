//! Host contract for provider resources.
//!
//! The plan/apply engine lives in the host. This crate carries what the host
//! hands to a resource implementation:
//!
//! - [`ResourceData`]: the string-keyed attribute accessor for one record
//! - [`Schema`]: attribute declarations and pre-flight validation
//! - [`Resource`]: the create/read/update/delete/import lifecycle

pub mod data;
pub mod resource;
pub mod schema;

pub use data::{DataError, ResourceData};
pub use resource::{Importer, Resource, ResourceError};
pub use schema::{Attribute, AttributeType, FieldError, Schema, ValidationErrors, Validator};
