//! In-memory `UserRepository`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{DeleteMode, EntityId, PublicId, User};

use super::table::{Record, Table};

impl Record for User {
    fn entity_id(&self) -> EntityId {
        self.id()
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            ("users_public_id_key", self.public_id().to_string()),
            ("users_username_key", self.username().to_string()),
        ]
    }
}

/// `UserRepository` over a shared in-memory table.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    table: Arc<Table<User>>,
}

impl InMemoryUserRepository {
    pub(super) fn new(table: Arc<Table<User>>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        self.table.insert(user.clone()).await
    }

    async fn list_active(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.table.filter_live(|_| true).await)
    }

    async fn find_by_public_id(
        &self,
        public_id: PublicId,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self.table.find_live(|u| u.public_id() == public_id).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .table
            .find_live(|u| u.username().as_str() == username)
            .await)
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        u64::try_from(self.table.len().await)
            .map_err(|_| RepositoryError::query("user count overflow"))
    }

    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError> {
        self.table.delete(id, mode).await;
        Ok(())
    }
}
