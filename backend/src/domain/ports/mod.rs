//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, artifact storage, hashing, tokens) expose
//! typed errors so adapters map their failures into predictable variants.
//! Driving ports return domain [`Error`](crate::domain::Error) values and are
//! what inbound adapters hold.

mod macros;
pub(crate) use macros::define_port_error;

mod artifact_store;
mod department_registry;
mod department_repository;
mod directorate_registry;
mod directorate_repository;
mod login_service;
mod password_hasher;
mod program_catalogue;
mod program_repository;
mod repository_error;
mod token_issuer;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use artifact_store::MockArtifactStore;
pub use artifact_store::{ArtifactStore, ArtifactStoreError, StagedArtifact, extension_of};
#[cfg(test)]
pub use department_registry::MockDepartmentRegistry;
pub use department_registry::DepartmentRegistry;
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
pub use department_repository::DepartmentRepository;
#[cfg(test)]
pub use directorate_registry::MockDirectorateRegistry;
pub use directorate_registry::DirectorateRegistry;
#[cfg(test)]
pub use directorate_repository::MockDirectorateRepository;
pub use directorate_repository::DirectorateRepository;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use program_catalogue::MockProgramCatalogue;
pub use program_catalogue::{CreateProgramRequest, ProgramCatalogue, UploadedArtifact};
#[cfg(test)]
pub use program_repository::MockProgramRepository;
pub use program_repository::ProgramRepository;
pub use repository_error::{RepositoryError, map_repository_error};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
