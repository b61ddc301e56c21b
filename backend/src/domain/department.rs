//! Department aggregate.

use super::ids::{EntityId, PublicId};
use super::name::EntityName;
use super::reference::RegistryRef;

/// Organisational department. A leaf entity referenced by programs.
///
/// # Examples
/// ```
/// use org_registry::domain::{Department, EntityName};
///
/// let department = Department::new(EntityName::new("Finance").unwrap());
/// assert_eq!(department.name().as_ref(), "Finance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: EntityId,
    public_id: PublicId,
    name: EntityName,
}

impl Department {
    /// Create a new department with freshly generated identifiers.
    #[must_use]
    pub fn new(name: EntityName) -> Self {
        Self::from_parts(EntityId::generate(), PublicId::generate(), name)
    }

    /// Rehydrate a department loaded from storage.
    #[must_use]
    pub const fn from_parts(id: EntityId, public_id: PublicId, name: EntityName) -> Self {
        Self {
            id,
            public_id,
            name,
        }
    }

    /// Internal identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Public identifier.
    #[must_use]
    pub const fn public_id(&self) -> PublicId {
        self.public_id
    }

    /// Department name.
    #[must_use]
    pub const fn name(&self) -> &EntityName {
        &self.name
    }

    /// Reference suitable for embedding in a program.
    #[must_use]
    pub fn to_ref(&self) -> RegistryRef {
        RegistryRef {
            id: self.id,
            public_id: self.public_id,
            name: self.name.to_string(),
        }
    }
}
