//! Authentication primitives: login credentials, token claims and tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::ids::PublicId;
use super::user::User;

/// Reasons a login payload is rejected before any lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password submitted to `POST /auth/login`.
///
/// The username is trimmed; the password is kept byte for byte and wiped
/// from memory on drop.
///
/// # Examples
/// ```
/// use org_registry::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        match (username.is_empty(), password.is_empty()) {
            (true, _) => Err(LoginValidationError::EmptyUsername),
            (false, true) => Err(LoginValidationError::EmptyPassword),
            (false, false) => Ok(Self {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Public id of the authenticated user.
    pub sub: PublicId,
    /// Username at the time of issue.
    pub username: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl AuthClaims {
    /// Build claims for `user` valid for `ttl_secs` from `now`.
    #[must_use]
    pub fn for_user(user: &User, now: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user.public_id(),
            username: user.username().to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        }
    }
}

/// Signed bearer token handed back after a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(Zeroizing::new(encoded.into()))
    }

    /// Borrow the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
