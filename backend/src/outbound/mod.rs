//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: in-memory repositories for tests and database-less runs
//! - **artifacts**: uploaded program files under the public directory
//! - **security**: argon2id password hashing and JWT bearer tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod artifacts;
pub mod memory;
pub mod persistence;
pub mod security;
