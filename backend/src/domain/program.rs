//! Program aggregate and its category-scoped code.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::EntityId;
use super::name::EntityName;
use super::reference::RegistryRef;

/// Category deciding which code series a program belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ProgramCategory {
    /// Process-based programs, coded `SB0001`, `SB0002`, ...
    ProcessBased,
    /// Unit-based programs, coded `BB0001`, `BB0002`, ...
    UnitBased,
}

impl ProgramCategory {
    /// Map the `processBased` flag onto a category.
    #[must_use]
    pub const fn from_process_based(process_based: bool) -> Self {
        if process_based {
            Self::ProcessBased
        } else {
            Self::UnitBased
        }
    }

    /// Two-letter code prefix for the category.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::ProcessBased => "SB",
            Self::UnitBased => "BB",
        }
    }

    /// Whether this is the process-based series.
    #[must_use]
    pub const fn is_process_based(self) -> bool {
        matches!(self, Self::ProcessBased)
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ProcessBased => "process_based",
            Self::UnitBased => "unit_based",
        };
        f.write_str(label)
    }
}

/// Generated, immutable program code such as `BB0001`.
///
/// Codes are only ever produced by the allocator or rehydrated from storage,
/// so no validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "BB0001")]
pub struct ProgramCode(String);

impl ProgramCode {
    /// Wrap a stored or freshly allocated code.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProgramCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProgramCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A program with its resolved department and directorate references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Internal identifier.
    pub id: EntityId,
    /// Code assigned at creation.
    pub code: ProgramCode,
    /// Unique program name.
    pub name: EntityName,
    /// Free-form identifiers of associated users.
    pub users: Vec<String>,
    /// Departments the program belongs to.
    pub departments: Vec<RegistryRef>,
    /// Directorates the program belongs to.
    pub directorates: Vec<RegistryRef>,
    /// Code series the program was allocated from.
    pub category: ProgramCategory,
}

/// A program ready to be inserted.
///
/// Department and directorate links are stored by internal id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgram {
    /// Internal identifier.
    pub id: EntityId,
    /// Allocated code.
    pub code: ProgramCode,
    /// Program name.
    pub name: EntityName,
    /// Free-form identifiers of associated users.
    pub users: Vec<String>,
    /// Internal ids of linked departments.
    pub department_ids: Vec<EntityId>,
    /// Internal ids of linked directorates.
    pub directorate_ids: Vec<EntityId>,
    /// Code series.
    pub category: ProgramCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, ProgramCategory::ProcessBased, "SB")]
    #[case(false, ProgramCategory::UnitBased, "BB")]
    fn flag_selects_category_and_prefix(
        #[case] flag: bool,
        #[case] expected: ProgramCategory,
        #[case] prefix: &str,
    ) {
        let category = ProgramCategory::from_process_based(flag);
        assert_eq!(category, expected);
        assert_eq!(category.prefix(), prefix);
        assert_eq!(category.is_process_based(), flag);
    }

    #[rstest]
    fn code_serialises_as_plain_string() {
        let value = serde_json::to_value(ProgramCode::new("SB0007")).expect("json");
        assert_eq!(value, serde_json::json!("SB0007"));
    }
}
