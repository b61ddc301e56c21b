//! In-memory `DirectorateRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DirectorateRepository, RepositoryError};
use crate::domain::{DeleteMode, Directorate, EntityId, NewProgram, PublicId};

use super::table::{Record, Table};

impl Record for Directorate {
    fn entity_id(&self) -> EntityId {
        self.id()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("directorates_public_id_key", self.public_id().to_string()),
            ("directorates_name_key", self.name().to_string()),
        ]
    }
}

/// `DirectorateRepository` over a shared in-memory table.
#[derive(Clone)]
pub struct InMemoryDirectorateRepository {
    table: Arc<Table<Directorate>>,
    programs: Arc<Table<NewProgram>>,
}

impl InMemoryDirectorateRepository {
    pub(super) fn new(table: Arc<Table<Directorate>>, programs: Arc<Table<NewProgram>>) -> Self {
        Self { table, programs }
    }
}

#[async_trait]
impl DirectorateRepository for InMemoryDirectorateRepository {
    async fn insert(&self, directorate: &Directorate) -> Result<(), RepositoryError> {
        self.table.insert(directorate.clone()).await
    }

    async fn list_active(&self) -> Result<Vec<Directorate>, RepositoryError> {
        Ok(self.table.filter_live(|_| true).await)
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<Directorate>, RepositoryError> {
        Ok(self.table.find_live(|d| d.public_id() == public_id).await)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Directorate>, RepositoryError> {
        Ok(self.table.find_live(|d| d.name().as_ref() == name).await)
    }

    async fn find_by_public_ids(
        &self,
        public_ids: &[PublicId],
    ) -> Result<Vec<Directorate>, RepositoryError> {
        Ok(self
            .table
            .filter_live(|d| public_ids.contains(&d.public_id()))
            .await)
    }

    async fn count_active_children(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let children = self.table.filter_live(|d| d.parent_id() == Some(id)).await;
        u64::try_from(children.len()).map_err(|_| RepositoryError::query("child count overflow"))
    }

    async fn count_active_programs(&self, id: EntityId) -> Result<u64, RepositoryError> {
        let linked = self.programs.filter_live(|p| p.directorate_ids.contains(&id)).await;
        u64::try_from(linked.len()).map_err(|_| RepositoryError::query("program count overflow"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        self.table.delete(id, mode).await;
        if mode == DeleteMode::Hard {
            // Same effect as ON DELETE SET NULL on directorates.parent_id.
            self.table
                .update_all(|d| {
                    if d.parent_id() == Some(id) {
                        *d = Directorate::from_parts(d.id(), d.public_id(), d.name().clone(), None);
                    }
                })
                .await;
        }
        Ok(())
    }
}
