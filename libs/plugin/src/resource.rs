//! Resource lifecycle contract.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::data::{DataError, ResourceData};
use crate::schema::{Schema, ValidationErrors};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned from resource lifecycle operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Configuration rejected before any remote call.
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Data(#[from] DataError),

    /// The identity cannot be turned into a remote id.
    #[error("invalid resource id '{0}'")]
    InvalidId(String),

    /// Import named a remote object that does not exist.
    #[error("cannot import non-existent remote object with id '{0}'")]
    ImportNotFound(String),

    #[error("resource type '{0}' does not support import")]
    ImportUnsupported(&'static str),

    /// Error from the remote API, passed through unchanged.
    #[error(transparent)]
    Remote(BoxError),
}

impl ResourceError {
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remote(Box::new(err))
    }

    /// The underlying API error, for callers that need to downcast it.
    pub fn remote_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Remote(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// How a resource turns a user-supplied id into state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importer {
    /// The id becomes the identity and `read` fills in everything else.
    Passthrough,
    Unsupported,
}

/// A managed resource type.
///
/// The host calls one lifecycle method at a time per record, each with
/// exclusive access to its data.
#[async_trait]
pub trait Resource: Send + Sync {
    /// The provider's shared API handle.
    type Meta: ?Sized + Sync;

    /// Type name as used in configuration, e.g. `netbox_vlan_group`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> &Schema;

    fn importer(&self) -> Importer {
        Importer::Passthrough
    }

    /// Validate configuration against the schema.
    fn validate(&self, data: &ResourceData) -> Result<(), ResourceError> {
        self.schema().validate(data).map_err(ResourceError::from)
    }

    async fn create(
        &self,
        data: &mut ResourceData,
        meta: &Self::Meta,
    ) -> Result<(), ResourceError>;

    /// Refresh data from the remote object. Clears the identity when the
    /// object no longer exists.
    async fn read(
        &self,
        data: &mut ResourceData,
        meta: &Self::Meta,
    ) -> Result<(), ResourceError>;

    async fn update(
        &self,
        data: &mut ResourceData,
        meta: &Self::Meta,
    ) -> Result<(), ResourceError>;

    async fn delete(
        &self,
        data: &mut ResourceData,
        meta: &Self::Meta,
    ) -> Result<(), ResourceError>;

    /// Import an existing remote object by id.
    async fn import(&self, id: &str, meta: &Self::Meta) -> Result<ResourceData, ResourceError> {
        if self.importer() == Importer::Unsupported {
            return Err(ResourceError::ImportUnsupported(self.type_name()));
        }

        debug!(resource = self.type_name(), id, "Importing resource");
        let mut data = ResourceData::with_id(id);
        self.read(&mut data, meta).await?;

        if !data.has_id() {
            return Err(ResourceError::ImportNotFound(id.to_string()));
        }
        Ok(data)
    }
}
