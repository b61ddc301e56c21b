//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Every Diesel failure is mapped into
//! `RepositoryError` by the shared helpers.
//!
//! # Example
//!
//! ```ignore
//! use org_registry::outbound::persistence::{DbPool, DieselDepartmentRepository, PoolConfig};
//!
//! let pool = DbPool::new(&PoolConfig::new("postgres://localhost/registry")).await?;
//! let departments = DieselDepartmentRepository::new(pool);
//! ```

mod diesel_department_repository;
mod diesel_directorate_repository;
mod diesel_helpers;
mod diesel_program_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_directorate_repository::DieselDirectorateRepository;
pub use diesel_program_repository::DieselProgramRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
