//! Non-owning references between registry entities.

use super::ids::{EntityId, PublicId};

/// Lightweight reference to a department or directorate.
///
/// Programs and directorate trees hold these instead of the full record so
/// ownership stays with the owning repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRef {
    /// Internal identifier used for joins.
    pub id: EntityId,
    /// Public identifier exposed to clients.
    pub public_id: PublicId,
    /// Display name at the time of loading.
    pub name: String,
}
