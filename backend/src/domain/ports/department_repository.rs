//! Port abstraction for department persistence.
use async_trait::async_trait;

use crate::domain::{DeleteMode, Department, EntityId, PublicId};

use super::RepositoryError;

/// Storage for departments.
///
/// Every lookup ignores soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Insert a new department.
    async fn insert(&self, department: &Department) -> Result<(), RepositoryError>;

    /// All live departments in creation order.
    async fn list_active(&self) -> Result<Vec<Department>, RepositoryError>;

    /// Fetch a live department by public id.
    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Department>, RepositoryError>;

    /// Fetch a live department by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, RepositoryError>;

    /// Fetch every live department whose public id is in `public_ids`.
    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Department>, RepositoryError>;

    /// Count live programs linked to the department `id`.
    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError>;

    /// Remove a department.
    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError>;
}
