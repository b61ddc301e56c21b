//! Login and initial-account seeding.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHasher, TokenError, TokenIssuer, UserRepository, map_repository_error,
};
use crate::domain::user_service::map_hash_error;
use crate::domain::{
    AccessToken, AuthClaims, Error, LoginCredentials, NewPassword, User, Username,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Invalid { .. } | TokenError::Expired => {
            Error::unauthorized("Invalid or expired token")
        }
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

/// Credential-checking service implementing [`LoginService`].
#[derive(Clone)]
pub struct AuthService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<R, H> AuthService<R, H> {
    /// Create a new service.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<R, H> LoginService for AuthService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens.issue(&user).map_err(map_token_error)
    }

    fn authenticate(&self, token: &str) -> Result<AuthClaims, Error> {
        self.tokens.verify(token).map_err(map_token_error)
    }
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The admin account was created.
    Seeded,
    /// The user table already held rows.
    Skipped,
}

/// Creates the initial admin account when no users exist.
///
/// The configured password is stored as-is, without the strength policy
/// applied to registrations.
pub struct AdminSeeder<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    username: String,
    password: Zeroizing<String>,
}

impl<R, H> AdminSeeder<R, H> {
    /// Create a seeder for the given admin credentials.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<H>,
        username: impl Into<String>,
        password: Zeroizing<String>,
    ) -> Self {
        Self {
            users,
            hasher,
            username: username.into(),
            password,
        }
    }
}

impl<R, H> AdminSeeder<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    /// Seed the admin account if the user table is empty.
    ///
    /// # Errors
    /// Returns a domain error when the store or the hasher fails.
    pub async fn seed(&self) -> Result<SeedOutcome, Error> {
        let count = self
            .users
            .count_all()
            .await
            .map_err(map_repository_error)?;
        if count > 0 {
            info!("Cancelled seeding, table contains data.");
            return Ok(SeedOutcome::Skipped);
        }

        let password = NewPassword::unchecked(self.password.as_str());
        let hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let admin = User::new(Username::from_stored(self.username.as_str()), hash);
        self.users
            .insert(&admin)
            .await
            .map_err(map_repository_error)?;
        info!(username = %admin.username(), "Seeding complete!");
        Ok(SeedOutcome::Seeded)
    }
}
