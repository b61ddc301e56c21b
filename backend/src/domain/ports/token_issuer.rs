//! Port abstraction for bearer token signing and verification.
use crate::domain::{AccessToken, AuthClaims, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token is malformed or its signature does not match.
        Invalid { message } => "token is invalid: {message}",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// Signing failed.
        Signing { message } => "token signing failed: {message}",
    }
}

/// Issues and verifies signed access tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `user`.
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError>;

    /// Verify `token` and return its claims.
    fn verify(&self, token: &str) -> Result<AuthClaims, TokenError>;
}
