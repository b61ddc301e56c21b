//! Port abstraction for password hashing.
use async_trait::async_trait;

use crate::domain::{NewPassword, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification could not run.
        Hashing { message } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a PHC string.
    async fn hash(&self, password: &NewPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check `candidate` against a stored hash.
    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
