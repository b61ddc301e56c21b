//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    departments, directorates, program_departments, program_directorates, programs, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub public_id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: String,
    pub public_id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Department models
// ---------------------------------------------------------------------------

/// Row struct for reading from the departments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DepartmentRow {
    pub id: String,
    pub public_id: Uuid,
    pub name: String,
}

/// Insertable struct for creating new department records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departments)]
pub(crate) struct NewDepartmentRow<'a> {
    pub id: String,
    pub public_id: Uuid,
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Directorate models
// ---------------------------------------------------------------------------

/// Row struct for reading from the directorates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = directorates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DirectorateRow {
    pub id: String,
    pub public_id: Uuid,
    pub name: String,
    pub parent_id: Option<String>,
}

/// Insertable struct for creating new directorate records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = directorates)]
pub(crate) struct NewDirectorateRow<'a> {
    pub id: String,
    pub public_id: Uuid,
    pub name: &'a str,
    pub parent_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Program models
// ---------------------------------------------------------------------------

/// Row struct for reading from the programs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgramRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub users: Vec<String>,
    pub process_based: bool,
}

/// Insertable struct for creating new program records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = programs)]
pub(crate) struct NewProgramRow<'a> {
    pub id: String,
    pub code: &'a str,
    pub name: &'a str,
    pub users: &'a [String],
    pub process_based: bool,
}

/// Join row linking a program to a department.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = program_departments)]
pub(crate) struct ProgramDepartmentRow {
    pub program_id: String,
    pub department_id: String,
}

/// Join row linking a program to a directorate.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = program_directorates)]
pub(crate) struct ProgramDirectorateRow {
    pub program_id: String,
    pub directorate_id: String,
}
