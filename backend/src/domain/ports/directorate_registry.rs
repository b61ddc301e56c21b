//! Driving port for directorate management.
use async_trait::async_trait;

use crate::domain::{DeleteMode, Directorate, DirectorateNode, EntityName, Error, PublicId};

/// Domain use-case port for the directorate hierarchy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorateRegistry: Send + Sync {
    /// Create a directorate, optionally under an existing live parent.
    async fn create(
        &self,
        name: EntityName,
        parent: Option<PublicId>,
    ) -> Result<Directorate, Error>;

    /// Every live directorate with its parent and children resolved.
    async fn list(&self) -> Result<Vec<DirectorateNode>, Error>;

    /// A single live directorate with its parent and children resolved.
    async fn find(&self, public_id: PublicId) -> Result<DirectorateNode, Error>;

    /// Live directorates matching any of `public_ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, public_ids: &[PublicId]) -> Result<Vec<Directorate>, Error>;

    /// Delete a childless directorate.
    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error>;
}
