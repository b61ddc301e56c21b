//! Rendering of domain errors as HTTP responses.
//!
//! Every failure leaves a handler as an [`ErrorEnvelope`] with the status
//! code derived from its [`ErrorCode`]. Internal failures are logged in full
//! and then reduced to a generic message before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::envelope::ErrorEnvelope;

/// Result type returned by registry handlers.
pub type ApiResult<T> = Result<T, Error>;

const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Copy of `error` safe to show to clients.
fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(
        message = error.message(),
        trace_id = ?error.trace_id(),
        "request failed with an internal error"
    );
    let generic = Error::internal(GENERIC_INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => generic.with_trace_id(id.to_owned()),
        None => generic,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let public = redact_if_internal(self);
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = public.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(ErrorEnvelope::from(&public))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced through a handler");
        Error::internal(GENERIC_INTERNAL_MESSAGE)
    }
}
