//! Port abstraction for program persistence.
use async_trait::async_trait;

use crate::domain::{DeleteMode, EntityId, NewProgram, Program, ProgramCategory, ProgramCode};

use super::RepositoryError;

/// Storage for programs and their department/directorate links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Insert a program together with its join rows.
    async fn insert(&self, program: &NewProgram) -> Result<(), RepositoryError>;

    /// All live programs with their live references, in creation order.
    async fn list_active(&self) -> Result<Vec<Program>, RepositoryError>;

    /// Fetch a live program by code.
    async fn find_by_code(&self, code: &ProgramCode) -> Result<Option<Program>, RepositoryError>;

    /// Internal id of the live program called `name`, if any.
    async fn find_id_by_name(&self, name: &str) -> Result<Option<EntityId>, RepositoryError>;

    /// Every code ever issued in `category`.
    ///
    /// Soft-deleted programs count, and so do the reserved codes of
    /// hard-deleted ones.
    async fn codes_in_category(
        &self,
        category: ProgramCategory,
    ) -> Result<Vec<ProgramCode>, RepositoryError>;

    /// Remove a program. A hard delete keeps its code reserved.
    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError>;
}
