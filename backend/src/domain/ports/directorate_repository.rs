//! Port abstraction for directorate persistence.
use async_trait::async_trait;

use crate::domain::{DeleteMode, Directorate, EntityId, PublicId};

use super::RepositoryError;

/// Storage for directorates.
///
/// Every lookup ignores soft-deleted rows. Children are never stored; they
/// are derived from the `parent_id` of other rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorateRepository: Send + Sync {
    /// Insert a new directorate.
    async fn insert(&self, directorate: &Directorate) -> Result<(), RepositoryError>;

    /// All live directorates in creation order.
    async fn list_active(&self) -> Result<Vec<Directorate>, RepositoryError>;

    /// Fetch a live directorate by public id.
    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Directorate>, RepositoryError>;

    /// Fetch a live directorate by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Directorate>, RepositoryError>;

    /// Fetch every live directorate whose public id is in `public_ids`.
    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Directorate>, RepositoryError>;

    /// Count live directorates whose parent is `id`.
    async fn count_active_children(&self, id: EntityId) -> Result<u64, RepositoryError>;

    /// Count live programs linked to the directorate `id`.
    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError>;

    /// Remove a directorate.
    ///
    /// Hard deletes detach any remaining (soft-deleted) children.
    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError>;
}
