//! User account model and credential policies.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::ids::{EntityId, PublicId};

/// Validation errors returned by [`Username::new`] and [`NewPassword::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username fails the character, length or dot rules.
    InvalidUsername,
    /// Password fails the strength policy.
    InvalidPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUsername => write!(f, "Username is invalid"),
            Self::InvalidPassword => write!(f, "Password is invalid"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 30;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Dot placement is checked separately; the regex crate has no lookaround.
        let pattern = "^[A-Za-z0-9_][A-Za-z0-9_.]{0,29}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Login name of a user.
///
/// ## Invariants
/// - 1 to [`USERNAME_MAX`] ASCII characters.
/// - Starts with a letter, digit or underscore; the rest may also be dots.
/// - No consecutive dots and no trailing dot.
///
/// # Examples
/// ```
/// use org_registry::domain::Username;
///
/// assert!(Username::new("ada.lovelace").is_ok());
/// assert!(Username::new("ada..lovelace").is_err());
/// assert!(Username::new(".ada").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidUsername`] when any rule fails.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if !username_regex().is_match(&raw) || raw.contains("..") || raw.ends_with('.') {
            return Err(UserValidationError::InvalidUsername);
        }
        Ok(Self(raw))
    }

    /// Rehydrate a stored username without re-validating it.
    ///
    /// Seeded accounts may predate the policy.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A plaintext password that satisfies the strength policy.
///
/// At least [`PASSWORD_MIN`] characters with an ASCII digit, a lowercase and
/// an uppercase ASCII letter, and no line breaks.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Validate a candidate password.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidPassword`] when the policy fails.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(raw.into());
        let long_enough = raw.chars().count() >= PASSWORD_MIN;
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
        let single_line = !raw.contains(['\n', '\r']);
        if long_enough && has_digit && has_lower && has_upper && single_line {
            Ok(Self(raw))
        } else {
            Err(UserValidationError::InvalidPassword)
        }
    }

    /// Accept any password verbatim.
    ///
    /// Only the admin seeder uses this; it mirrors configured credentials.
    pub fn unchecked(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the plaintext.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

/// Argon2 PHC string produced by the password hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Application user.
///
/// The password hash stays inside the domain and persistence layers; HTTP
/// adapters only ever see [`User::public_id`] and [`User::username`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: EntityId,
    public_id: PublicId,
    username: Username,
    password_hash: PasswordHash,
}

impl User {
    /// Create a brand new account.
    #[must_use]
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self::from_parts(
            EntityId::generate(),
            PublicId::generate(),
            username,
            password_hash,
        )
    }

    /// Rehydrate a user loaded from storage.
    #[must_use]
    pub const fn from_parts(
        id: EntityId,
        public_id: PublicId,
        username: Username,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            public_id,
            username,
            password_hash,
        }
    }

    /// Internal identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Public identifier used as the token subject.
    #[must_use]
    pub const fn public_id(&self) -> PublicId {
        self.public_id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod tests;
