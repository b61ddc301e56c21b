//! Validated display names for departments, directorates and programs.

use std::fmt;

/// Maximum stored length of an entity name, in characters.
pub const ENTITY_NAME_MAX: usize = 255;

/// Validation errors returned by [`EntityName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    /// The name was empty once trimmed.
    Empty,
    /// The name exceeds [`ENTITY_NAME_MAX`] characters.
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl fmt::Display for NameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for NameValidationError {}

/// Unique, human-readable name of a registry entity.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - Non-empty and at most [`ENTITY_NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use org_registry::domain::EntityName;
///
/// let name = EntityName::new("  Finance ").unwrap();
/// assert_eq!(name.as_ref(), "Finance");
/// assert!(EntityName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// Validate and construct a name.
    ///
    /// # Errors
    /// Returns [`NameValidationError`] when the trimmed input is empty or too long.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, NameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NameValidationError::Empty);
        }
        if trimmed.chars().count() > ENTITY_NAME_MAX {
            return Err(NameValidationError::TooLong {
                max: ENTITY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EntityName> for String {
    fn from(value: EntityName) -> Self {
        value.0
    }
}
