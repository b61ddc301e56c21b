//! Driving port for user account management.
use async_trait::async_trait;

use crate::domain::{DeleteMode, Error, PublicId, User};

/// Domain use-case port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register a user after validating the username and password policies.
    async fn create(&self, username: &str, password: &str) -> Result<User, Error>;

    /// Every live user; an empty directory is reported as not found.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// A single live user.
    async fn find(&self, public_id: PublicId) -> Result<User, Error>;

    /// Delete a user.
    async fn delete(&self, public_id: PublicId, mode: DeleteMode) -> Result<(), Error>;
}
