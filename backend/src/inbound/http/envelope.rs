//! Response envelope shared by every API endpoint.
//!
//! Success bodies look like `{"status":"success","data":...,"timestamp":...}`
//! and omit `data` when the payload is null, an empty array or an empty
//! object. Error bodies carry `{"status":"error","code","message",...}`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Outcome tag carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The request succeeded.
    Success,
    /// The request failed.
    Error,
}

/// Success envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessEnvelope {
    #[schema(example = "success")]
    status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Unix epoch milliseconds.
    timestamp: i64,
}

/// Error envelope.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[schema(example = "error")]
    status: EnvelopeStatus,
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    details: Option<Value>,
    /// Unix epoch milliseconds.
    timestamp: i64,
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: error.trace_id().map(str::to_owned),
            details: error.details().cloned(),
            timestamp: now_millis(),
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Wrap `payload` in a success envelope with the given status.
///
/// # Errors
/// Returns an internal error if `payload` cannot be serialised.
pub fn respond<T: Serialize>(status: StatusCode, payload: &T) -> Result<HttpResponse, Error> {
    let value = serde_json::to_value(payload).map_err(|err| {
        error!(error = %err, "response payload serialisation failed");
        Error::internal("Internal server error")
    })?;
    let envelope = SuccessEnvelope {
        status: EnvelopeStatus::Success,
        data: (!is_empty_payload(&value)).then_some(value),
        message: None,
        timestamp: now_millis(),
    };
    Ok(HttpResponse::build(status).json(envelope))
}

/// `200 OK` with `payload` as data.
///
/// # Errors
/// Returns an internal error if `payload` cannot be serialised.
pub fn ok<T: Serialize>(payload: &T) -> Result<HttpResponse, Error> {
    respond(StatusCode::OK, payload)
}

/// `201 Created` with no data.
#[must_use]
pub fn created() -> HttpResponse {
    empty(StatusCode::CREATED)
}

/// Envelope with no data, for deletes and other confirmations.
#[must_use]
pub fn empty(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(SuccessEnvelope {
        status: EnvelopeStatus::Success,
        data: None,
        message: None,
        timestamp: now_millis(),
    })
}
