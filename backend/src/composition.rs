//! Assembly of driven adapters into the HTTP driving ports.
//!
//! The server binary, the seeding binary and the integration tests all build
//! the same service graph; only the repository family differs (Diesel or
//! in-memory).

use std::sync::Arc;

use crate::domain::ports::{
    ArtifactStore, DepartmentRegistry, DepartmentRepository, DirectorateRegistry,
    DirectorateRepository, PasswordHasher, ProgramRepository, TokenIssuer, UserRepository,
};
use crate::domain::{
    AdminSeeder, AuthService, DepartmentService, DirectorateService, Error, ProgramService,
    SeedOutcome, UserService,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::memory::{
    InMemoryDepartmentRepository, InMemoryDirectorateRepository, InMemoryProgramRepository,
    InMemoryStore, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselDepartmentRepository, DieselDirectorateRepository, DieselProgramRepository,
    DieselUserRepository,
};
use crate::settings::AdminSettings;

/// Every driven adapter the registry services need.
pub struct RegistryAdapters<U, D, R, P, H, A> {
    pub users: Arc<U>,
    pub departments: Arc<D>,
    pub directorates: Arc<R>,
    pub programs: Arc<P>,
    pub hasher: Arc<H>,
    pub artifacts: Arc<A>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl<U, D, R, P, H, A> Clone for RegistryAdapters<U, D, R, P, H, A> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            departments: Arc::clone(&self.departments),
            directorates: Arc::clone(&self.directorates),
            programs: Arc::clone(&self.programs),
            hasher: Arc::clone(&self.hasher),
            artifacts: Arc::clone(&self.artifacts),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Repositories backed by PostgreSQL.
pub type DieselRepositories = (
    DieselUserRepository,
    DieselDepartmentRepository,
    DieselDirectorateRepository,
    DieselProgramRepository,
);

/// Repositories backed by process memory.
pub type InMemoryRepositories = (
    InMemoryUserRepository,
    InMemoryDepartmentRepository,
    InMemoryDirectorateRepository,
    InMemoryProgramRepository,
);

/// Build the Diesel repository family over one pool.
pub fn diesel_repositories(pool: &DbPool) -> DieselRepositories {
    (
        DieselUserRepository::new(pool.clone()),
        DieselDepartmentRepository::new(pool.clone()),
        DieselDirectorateRepository::new(pool.clone()),
        DieselProgramRepository::new(pool.clone()),
    )
}

/// Build the in-memory repository family over one store.
pub fn in_memory_repositories(store: &InMemoryStore) -> InMemoryRepositories {
    (
        store.users(),
        store.departments(),
        store.directorates(),
        store.programs(),
    )
}

impl<U, D, R, P, H, A> RegistryAdapters<U, D, R, P, H, A>
where
    U: UserRepository + 'static,
    D: DepartmentRepository + 'static,
    R: DirectorateRepository + 'static,
    P: ProgramRepository + 'static,
    H: PasswordHasher + 'static,
    A: ArtifactStore + 'static,
{
    /// Pair a repository family with the shared security and storage adapters.
    pub fn new(
        (users, departments, directorates, programs): (U, D, R, P),
        hasher: Arc<H>,
        artifacts: Arc<A>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users: Arc::new(users),
            departments: Arc::new(departments),
            directorates: Arc::new(directorates),
            programs: Arc::new(programs),
            hasher,
            artifacts,
            tokens,
        }
    }

    /// Build the services and bundle them as HTTP ports.
    ///
    /// The program service validates links through the same registry
    /// services the HTTP handlers use.
    pub fn ports(&self) -> HttpStatePorts {
        let departments: Arc<dyn DepartmentRegistry> =
            Arc::new(DepartmentService::new(Arc::clone(&self.departments)));
        let directorates: Arc<dyn DirectorateRegistry> =
            Arc::new(DirectorateService::new(Arc::clone(&self.directorates)));
        HttpStatePorts {
            login: Arc::new(AuthService::new(
                Arc::clone(&self.users),
                Arc::clone(&self.hasher),
                Arc::clone(&self.tokens),
            )),
            users: Arc::new(UserService::new(
                Arc::clone(&self.users),
                Arc::clone(&self.hasher),
            )),
            programs: Arc::new(ProgramService::new(
                Arc::clone(&self.programs),
                Arc::clone(&self.artifacts),
                Arc::clone(&departments),
                Arc::clone(&directorates),
            )),
            departments,
            directorates,
        }
    }

    /// Create the configured admin account when no users exist yet.
    ///
    /// # Errors
    /// Returns a domain error when the user store or the hasher fails.
    pub async fn seed_admin(&self, admin: &AdminSettings) -> Result<SeedOutcome, Error> {
        AdminSeeder::new(
            Arc::clone(&self.users),
            Arc::clone(&self.hasher),
            admin.username(),
            admin.password(),
        )
        .seed()
        .await
    }
}
