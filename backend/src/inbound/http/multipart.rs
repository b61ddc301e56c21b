//! Multipart form decoding for program creation.
//!
//! Text fields are buffered up to a small cap; the artifact is buffered up
//! to the configured upload limit. Unknown fields are drained and ignored.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;
use tracing::debug;

use crate::domain::ports::{CreateProgramRequest, UploadedArtifact};
use crate::domain::{Error, ProgramCategory};

use super::validation::{
    FieldName, missing_field_error, parse_entity_name, parse_json_string_array,
    parse_public_id_list,
};

const TEXT_FIELD_LIMIT: usize = 64 * 1024;

const NAME: FieldName = FieldName::new("name");
const DEPARTMENTS: FieldName = FieldName::new("departments");
const DIRECTORATES: FieldName = FieldName::new("directorates");
const PROCESS_BASED: FieldName = FieldName::new("processBased");
const USERS: FieldName = FieldName::new("users");
const FILE: FieldName = FieldName::new("file");

/// Raw program form as received, before validation.
#[derive(Debug, Default)]
pub struct ProgramForm {
    name: Option<String>,
    departments: Option<String>,
    directorates: Option<String>,
    process_based: Option<String>,
    users: Option<String>,
    file: Option<UploadedArtifact>,
}

fn map_multipart_error(err: MultipartError) -> Error {
    debug!(error = %err, "multipart decoding failed");
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

fn too_large(field: &str, limit: usize) -> Error {
    Error::invalid_request(format!("{field} exceeds the {limit} byte limit"))
}

async fn read_field(field: &mut Field, name: &str, limit: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
        if buffer.len() + chunk.len() > limit {
            return Err(too_large(name, limit));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}

async fn read_text(field: &mut Field, name: FieldName) -> Result<String, Error> {
    let bytes = read_field(field, name.as_str(), TEXT_FIELD_LIMIT).await?;
    String::from_utf8(bytes)
        .map_err(|_| Error::invalid_request(format!("{} must be UTF-8 text", name.as_str())))
}

impl ProgramForm {
    /// Drain `payload`, keeping the fields a program needs.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for malformed bodies or oversized fields.
    pub async fn read(mut payload: Multipart, max_upload_bytes: usize) -> Result<Self, Error> {
        let mut form = Self::default();
        while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
            let field_name = field.name().unwrap_or_default().to_owned();
            match field_name.as_str() {
                "name" => form.name = Some(read_text(&mut field, NAME).await?),
                "departments" => form.departments = Some(read_text(&mut field, DEPARTMENTS).await?),
                "directorates" => {
                    form.directorates = Some(read_text(&mut field, DIRECTORATES).await?);
                }
                "processBased" => {
                    form.process_based = Some(read_text(&mut field, PROCESS_BASED).await?);
                }
                "users" => form.users = Some(read_text(&mut field, USERS).await?),
                "file" => {
                    let original_name = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .unwrap_or_default()
                        .to_owned();
                    let bytes = read_field(&mut field, FILE.as_str(), max_upload_bytes).await?;
                    form.file = Some(UploadedArtifact {
                        original_name,
                        bytes,
                    });
                }
                other => {
                    debug!(field = other, "ignoring unknown multipart field");
                    read_field(&mut field, other, max_upload_bytes).await?;
                }
            }
        }
        Ok(form)
    }

    /// Validate the text fields and build a service request.
    ///
    /// A missing `file` is left for the service to reject, after the
    /// registry checks have run.
    ///
    /// # Errors
    /// Returns `InvalidRequest` with field details for missing or malformed
    /// fields.
    pub fn into_request(self) -> Result<CreateProgramRequest, Error> {
        let raw_name = self.name.ok_or_else(|| missing_field_error(NAME))?;
        let name = parse_entity_name(&raw_name, NAME)?;

        let departments = self
            .departments
            .ok_or_else(|| missing_field_error(DEPARTMENTS))?;
        let department_ids = parse_public_id_list(
            parse_json_string_array(&departments, DEPARTMENTS)?,
            DEPARTMENTS,
        )?;

        let directorates = self
            .directorates
            .ok_or_else(|| missing_field_error(DIRECTORATES))?;
        let directorate_ids = parse_public_id_list(
            parse_json_string_array(&directorates, DIRECTORATES)?,
            DIRECTORATES,
        )?;

        let users = match self.users {
            Some(raw) => parse_json_string_array(&raw, USERS)?,
            None => Vec::new(),
        };

        let process_based = self
            .process_based
            .is_some_and(|raw| raw.trim().eq_ignore_ascii_case("true"));

        Ok(CreateProgramRequest {
            name,
            department_ids,
            directorate_ids,
            category: ProgramCategory::from_process_based(process_based),
            users,
            artifact: self.file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::json;

    const DEPT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    const DIR: &str = "6f1c2a8e-4b7d-4f3a-9c2e-1d5b8a7e9f10";

    fn form() -> ProgramForm {
        ProgramForm {
            name: Some("Payroll".into()),
            departments: Some(format!("[\"{DEPT}\"]")),
            directorates: Some(format!("[\"{DIR}\"]")),
            process_based: None,
            users: Some("[\"ada\", \"grace\"]".into()),
            file: Some(UploadedArtifact {
                original_name: "brief.pdf".into(),
                bytes: b"%PDF".to_vec(),
            }),
        }
    }

    #[rstest]
    fn complete_form_builds_request() {
        let request = form().into_request().expect("valid form");
        assert_eq!(request.name.as_ref(), "Payroll");
        assert_eq!(request.department_ids.len(), 1);
        assert_eq!(request.directorate_ids.len(), 1);
        assert_eq!(request.users, vec!["ada".to_owned(), "grace".to_owned()]);
        assert_eq!(request.category, ProgramCategory::UnitBased);
        assert!(request.artifact.is_some());
    }

    #[rstest]
    #[case(Some("true"), ProgramCategory::ProcessBased)]
    #[case(Some("TRUE"), ProgramCategory::ProcessBased)]
    #[case(Some("yes"), ProgramCategory::UnitBased)]
    #[case(Some("false"), ProgramCategory::UnitBased)]
    #[case(None, ProgramCategory::UnitBased)]
    fn process_based_flag_is_case_insensitive(
        #[case] raw: Option<&str>,
        #[case] expected: ProgramCategory,
    ) {
        let mut input = form();
        input.process_based = raw.map(str::to_owned);
        assert_eq!(input.into_request().expect("valid").category, expected);
    }

    #[rstest]
    fn missing_file_is_left_to_the_service() {
        let mut input = form();
        input.file = None;
        assert!(input.into_request().expect("valid").artifact.is_none());
    }

    #[rstest]
    fn missing_name_names_the_field() {
        let mut input = form();
        input.name = None;
        let err = input.into_request().expect_err("missing name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("field")),
            Some(&json!("name"))
        );
    }

    #[rstest]
    #[case("not json", "invalid_json_array")]
    #[case("[\"nope\"]", "invalid_uuid")]
    fn malformed_departments_are_rejected(#[case] raw: &str, #[case] code: &str) {
        let mut input = form();
        input.departments = Some(raw.to_owned());
        let err = input.into_request().expect_err("malformed");
        let details = err.details().expect("details");
        assert_eq!(details.get("field"), Some(&json!("departments")));
        assert_eq!(details.get("code"), Some(&json!(code)));
    }
}
