//! In-memory `DepartmentRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DepartmentRepository, RepositoryError};
use crate::domain::{DeleteMode, Department, EntityId, NewProgram, PublicId};

use super::table::{Record, Table};

impl Record for Department {
    fn entity_id(&self) -> EntityId {
        self.id()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("departments_public_id_key", self.public_id().to_string()),
            ("departments_name_key", self.name().to_string()),
        ]
    }
}

/// `DepartmentRepository` over a shared in-memory table.
#[derive(Clone)]
pub struct InMemoryDepartmentRepository {
    table: Arc<Table<Department>>,
    programs: Arc<Table<NewProgram>>,
}

impl InMemoryDepartmentRepository {
    pub(super) fn new(table: Arc<Table<Department>>, programs: Arc<Table<NewProgram>>) -> Self {
        Self { table, programs }
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn insert(&self, department: &Department) -> Result<(), RepositoryError> {
        self.table.insert(department.clone()).await
    }

    async fn list_active(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.table.filter_live(|_| true).await)
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Department>, RepositoryError> {
        Ok(self.table.find_live(|d| d.public_id() == public_id).await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, RepositoryError> {
        Ok(self.table.find_live(|d| d.name().as_ref() == name).await)
    }

    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Department>, RepositoryError> {
        Ok(self
            .table
            .filter_live(|d| public_ids.contains(&d.public_id()))
            .await)
    }

    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let linked = self.programs.filter_live(|p| p.department_ids.contains(&id)).await;
        u64::try_from(linked.len()).map_err(|_| RepositoryError::query("program count overflow"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        self.table.delete(id, mode).await;
        Ok(())
    }
}
