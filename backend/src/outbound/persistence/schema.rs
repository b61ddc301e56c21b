//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts. Soft-deleted rows keep their username reserved.
    users (id) {
        /// Primary key: ULID string.
        id -> Varchar,
        /// Public identifier (UUID v4).
        public_id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Departments.
    departments (id) {
        id -> Varchar,
        public_id -> Uuid,
        name -> Varchar,
        deleted -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directorates. `parent_id` is self-referential and nulled when the
    /// parent row is hard-deleted.
    directorates (id) {
        id -> Varchar,
        public_id -> Uuid,
        name -> Varchar,
        parent_id -> Nullable<Varchar>,
        deleted -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Programs. `code` is allocated once and never reused.
    programs (id) {
        id -> Varchar,
        code -> Varchar,
        name -> Varchar,
        users -> Array<Text>,
        process_based -> Bool,
        deleted -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Codes of hard-deleted programs, kept out of circulation.
    retired_program_codes (code) {
        code -> Varchar,
        process_based -> Bool,
        retired_at -> Timestamptz,
    }
}

diesel::table! {
    /// Program to department links; cascades on hard delete of either side.
    program_departments (program_id, department_id) {
        program_id -> Varchar,
        department_id -> Varchar,
    }
}

diesel::table! {
    /// Program to directorate links; cascades on hard delete of either side.
    program_directorates (program_id, directorate_id) {
        program_id -> Varchar,
        directorate_id -> Varchar,
    }
}

diesel::joinable!(program_departments -> programs (program_id));
diesel::joinable!(program_departments -> departments (department_id));
diesel::joinable!(program_directorates -> programs (program_id));
diesel::joinable!(program_directorates -> directorates (directorate_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    departments,
    directorates,
    programs,
    retired_program_codes,
    program_departments,
    program_directorates,
);
