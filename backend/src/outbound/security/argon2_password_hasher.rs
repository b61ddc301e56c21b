//! `PasswordHasher` backed by argon2id PHC strings.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{NewPassword, PasswordHash};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| PasswordHash::new(phc.to_string()))
        .map_err(|err| PasswordHashError::hashing(err.to_string()))
}

fn verify_blocking(candidate: &str, encoded: &str) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(other) => Err(PasswordHashError::hashing(other.to_string())),
    }
}

async fn on_blocking_pool<T, F>(op: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| PasswordHashError::hashing(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &NewPassword) -> Result<PasswordHash, PasswordHashError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        on_blocking_pool(move || hash_blocking(&secret)).await
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let candidate = Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_str().to_owned();
        on_blocking_pool(move || verify_blocking(&candidate, &encoded)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_against_the_original_password() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher
            .hash(&NewPassword::unchecked("Correct1Horse"))
            .await
            .expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("Correct1Horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("Wrong1Horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let password = NewPassword::unchecked("admin");
        let first = hasher.hash(&password).await.expect("hash");
        let second = hasher.hash(&password).await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_reported() {
        let err = Argon2PasswordHasher::new()
            .verify("admin", &PasswordHash::new("plaintext"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
