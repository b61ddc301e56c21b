//! Shared helpers for the Diesel repositories: error mapping and stored
//! value conversion.

use tracing::debug;

use crate::domain::{EntityId, EntityName};
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors into repository connection errors.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors into repository errors.
///
/// Unique violations become [`RepositoryError::Duplicate`] carrying the
/// constraint name, so services can phrase a field-specific conflict.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unique index");
            RepositoryError::duplicate(format!("{constraint} already holds this value"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        _ => RepositoryError::query("database error"),
    }
}

/// Parse a stored ULID, reporting corruption as a query error.
pub(super) fn parse_entity_id(raw: &str) -> Result<EntityId, RepositoryError> {
    EntityId::parse(raw).map_err(|err| {
        debug!(value = raw, error = %err, "stored id is not a valid ULID");
        RepositoryError::query(format!("stored id {raw} is not a valid ULID"))
    })
}

/// Rehydrate a stored name, reporting corruption as a query error.
pub(super) fn parse_entity_name(raw: &str) -> Result<EntityName, RepositoryError> {
    EntityName::new(raw).map_err(|err| {
        debug!(value = raw, error = %err, "stored name violates the name rules");
        RepositoryError::query(format!("stored name {raw:?} is invalid: {err}"))
    })
}
