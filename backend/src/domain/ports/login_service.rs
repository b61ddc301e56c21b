//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute a test double instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthClaims, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue an access token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Verify a bearer token presented on a protected route.
    fn authenticate(&self, token: &str) -> Result<AuthClaims, Error>;
}
