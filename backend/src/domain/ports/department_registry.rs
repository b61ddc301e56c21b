//! Driving port for department management.
use async_trait::async_trait;

use crate::domain::{DeleteMode, Department, EntityName, Error, PublicId};

/// Domain use-case port for departments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRegistry: Send + Sync {
    /// Create a department with a unique name.
    async fn create(&self, name: EntityName) -> Result<Department, Error>;

    /// Every live department; an empty registry is reported as not found.
    async fn list(&self) -> Result<Vec<Department>, Error>;

    /// A single live department.
    async fn find(&self, public_id: PublicId) -> Result<Department, Error>;

    /// Live departments matching any of `public_ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, public_ids: &[PublicId]) -> Result<Vec<Department>, Error>;

    /// Delete a department.
    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error>;
}
