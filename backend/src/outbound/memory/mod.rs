//! In-memory repositories for tests and database-less development.
//!
//! [`InMemoryStore`] owns one table per entity; the repositories it hands
//! out share those tables, so program reads see department and directorate
//! deletions the same way the SQL joins do.

mod departments;
mod directorates;
mod programs;
mod table;
mod users;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Department, Directorate, NewProgram, ProgramCategory, ProgramCode, User};

pub use departments::InMemoryDepartmentRepository;
pub use directorates::InMemoryDirectorateRepository;
pub use programs::InMemoryProgramRepository;
pub use users::InMemoryUserRepository;

use table::Table;

/// Shared backing tables for the in-memory repositories.
///
/// # Examples
/// ```
/// use org_registry::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let departments = store.departments();
/// let programs = store.programs();
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<Table<User>>,
    departments: Arc<Table<Department>>,
    directorates: Arc<Table<Directorate>>,
    programs: Arc<Table<NewProgram>>,
    retired_codes: Arc<RwLock<Vec<(ProgramCategory, ProgramCode)>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// User repository over this store.
    #[must_use]
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(Arc::clone(&self.users))
    }

    /// Department repository over this store.
    #[must_use]
    pub fn departments(&self) -> InMemoryDepartmentRepository {
        InMemoryDepartmentRepository::new(
            Arc::clone(&self.departments),
            Arc::clone(&self.programs),
        )
    }

    /// Directorate repository over this store.
    #[must_use]
    pub fn directorates(&self) -> InMemoryDirectorateRepository {
        InMemoryDirectorateRepository::new(
            Arc::clone(&self.directorates),
            Arc::clone(&self.programs),
        )
    }

    /// Program repository over this store.
    #[must_use]
    pub fn programs(&self) -> InMemoryProgramRepository {
        InMemoryProgramRepository::new(
            Arc::clone(&self.programs),
            Arc::clone(&self.retired_codes),
            Arc::clone(&self.departments),
            Arc::clone(&self.directorates),
        )
    }
}
