//! `TokenIssuer` signing HS256 JWTs.
//!
//! Expiry is checked against the injected clock rather than by
//! `jsonwebtoken`, so issue and verify share one notion of "now".

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, AuthClaims, User};

/// HS256 token issuer sharing one secret for signing and verification.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Create an issuer whose tokens live for `ttl_secs` seconds.
    pub fn new(secret: &[u8], ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
            clock,
        }
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        let claims = AuthClaims::for_user(user, self.now(), self.ttl_secs);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let data = decode::<AuthClaims>(token, &self.decoding, &Self::validation()).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            },
        )?;
        if data.claims.exp <= self.now() {
            return Err(TokenError::expired());
        }
        Ok(data.claims)
    }
}
