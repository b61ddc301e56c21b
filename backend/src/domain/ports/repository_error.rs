//! Shared error type for entity repositories.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "repository query failed: {message}",
        /// A unique index rejected the write.
        Duplicate { message } => "duplicate record: {message}",
    }
}

/// Translate a repository failure into a domain error.
///
/// Callers that know which field collided should replace the generic
/// conflict message with a field-specific one.
pub fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::duplicate("name taken"), ErrorCode::Conflict)]
    fn maps_to_domain_codes(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_repository_error(error).code(), expected);
    }
}
