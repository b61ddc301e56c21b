//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EntityName, Error, NameValidationError, PublicId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidJsonArray,
    InvalidName,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidJsonArray => "invalid_json_array",
            ErrorCode::InvalidName => "invalid_name",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

pub(crate) fn invalid_json_array_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a JSON array of strings"))
        .with_value(ErrorCode::InvalidJsonArray, value)
}

pub(crate) fn parse_public_id(value: &str, field: FieldName) -> Result<PublicId, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_public_id_list(
    values: Vec<String>,
    field: FieldName,
) -> Result<Vec<PublicId>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .trim()
                .parse()
                .map_err(|_| invalid_uuid_index_error(field, index, &value))
        })
        .collect()
}

/// Decode a multipart text field holding a JSON array of strings.
pub(crate) fn parse_json_string_array(raw: &str, field: FieldName) -> Result<Vec<String>, Error> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|_| invalid_json_array_error(field, raw))
}

pub(crate) fn parse_entity_name(raw: &str, field: FieldName) -> Result<EntityName, Error> {
    EntityName::new(raw).map_err(|err| {
        let message = match err {
            NameValidationError::Empty => format!("{} must not be empty", field.as_str()),
            NameValidationError::TooLong { max } => {
                format!("{} must be at most {max} characters", field.as_str())
            }
        };
        ValidationError::new(field.as_str(), message).with_code(ErrorCode::InvalidName)
    })
}
