//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{DeleteMode, EntityId, PublicId, User};

use super::RepositoryError;

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// All live users in creation order.
    async fn list_active(&self) -> Result<Vec<User>, RepositoryError>;

    /// Fetch a live user by public id.
    async fn find_by_public_id(&self, public_id: PublicId)
    -> Result<Option<User>, RepositoryError>;

    /// Fetch a live user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Number of stored users, deleted ones included.
    async fn count_all(&self) -> Result<u64, RepositoryError>;

    /// Remove a user.
    async fn delete(&self, id: EntityId, mode: DeleteMode) -> Result<(), RepositoryError>;
}
