//! OpenAPI schema definitions with no runtime counterpart.
//!
//! Multipart bodies are decoded field by field rather than deserialised, so
//! their documented shape lives here.

use utoipa::ToSchema;

/// Multipart body of `POST /api/v1/programs`.
#[derive(ToSchema)]
pub struct CreateProgramForm {
    /// Unique program name.
    #[schema(example = "Payroll")]
    pub name: String,
    /// JSON array of department UUIDs.
    #[schema(example = "[\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"]")]
    pub departments: String,
    /// JSON array of directorate UUIDs.
    #[schema(example = "[\"6f1c2a8e-4b7d-4f3a-9c2e-1d5b8a7e9f10\"]")]
    pub directorates: String,
    /// `true` (any case) selects the process-based `SB` series.
    #[schema(rename = "processBased", example = "false")]
    pub process_based: Option<String>,
    /// JSON array of user identifiers.
    #[schema(example = "[\"ada\"]")]
    pub users: Option<String>,
    /// Program artifact; stored under the allocated code.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
