//! Program handlers. Creation is a bearer-guarded multipart upload that
//! allocates the program code; reads are public.
//!
//! ```text
//! POST   /api/v1/programs (multipart: name, departments, directorates,
//!                          processBased, users, file)
//! GET    /api/v1/programs
//! GET    /api/v1/programs/{code}
//! DELETE /api/v1/programs/{code}?soft=false
//! ```

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Program, ProgramCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{self, ErrorEnvelope};
use crate::inbound::http::multipart::ProgramForm;
use crate::inbound::http::params::DeleteParams;
use crate::inbound::http::reference::ReferenceResponse;
use crate::inbound::http::schemas::CreateProgramForm;
use crate::inbound::http::state::HttpState;

/// Program as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    #[schema(value_type = String, example = "BB0001")]
    pub code: ProgramCode,
    #[schema(example = "Payroll")]
    pub name: String,
    pub users: Vec<String>,
    pub departments: Vec<ReferenceResponse>,
    pub directorates: Vec<ReferenceResponse>,
    pub process_based: bool,
}

impl From<&Program> for ProgramResponse {
    fn from(program: &Program) -> Self {
        Self {
            code: program.code.clone(),
            name: program.name.to_string(),
            users: program.users.clone(),
            departments: program.departments.iter().map(ReferenceResponse::from).collect(),
            directorates: program
                .directorates
                .iter()
                .map(ReferenceResponse::from)
                .collect(),
            process_based: program.category.is_process_based(),
        }
    }
}

/// Create a program from a multipart upload.
#[utoipa::path(
    post,
    path = "/api/v1/programs",
    request_body(content = CreateProgramForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Program created"),
        (status = 400, description = "Malformed form or missing file", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Departments or directorates not found", body = ErrorEnvelope),
        (status = 409, description = "Name or code taken", body = ErrorEnvelope)
    ),
    tags = ["programs"],
    operation_id = "createProgram"
)]
#[post("/programs")]
pub async fn create_program(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let multipart = Multipart::new(req.headers(), payload);
    let form = ProgramForm::read(multipart, state.max_upload_bytes).await?;
    state.programs.create(form.into_request()?).await?;
    Ok(envelope::created())
}

/// List live programs. An empty catalogue answers without data.
#[utoipa::path(
    get,
    path = "/api/v1/programs",
    responses(
        (status = 200, description = "Programs", body = [ProgramResponse])
    ),
    tags = ["programs"],
    operation_id = "listPrograms",
    security([])
)]
#[get("/programs")]
pub async fn list_programs(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let programs = state.programs.list().await?;
    let body: Vec<ProgramResponse> = programs.iter().map(ProgramResponse::from).collect();
    envelope::ok(&body)
}

/// Fetch one program by code.
#[utoipa::path(
    get,
    path = "/api/v1/programs/{code}",
    params(("code" = String, Path, description = "Program code", example = "BB0001")),
    responses(
        (status = 200, description = "Program", body = ProgramResponse),
        (status = 404, description = "Unknown program", body = ErrorEnvelope)
    ),
    tags = ["programs"],
    operation_id = "getProgram",
    security([])
)]
#[get("/programs/{code}")]
pub async fn get_program(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let code = ProgramCode::new(path.into_inner());
    let program = state.programs.find(&code).await?;
    envelope::ok(&ProgramResponse::from(&program))
}

/// Delete a program; soft unless `?soft=false`.
#[utoipa::path(
    delete,
    path = "/api/v1/programs/{code}",
    params(("code" = String, Path, description = "Program code"), DeleteParams),
    responses(
        (status = 200, description = "Program deleted"),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown program", body = ErrorEnvelope)
    ),
    tags = ["programs"],
    operation_id = "deleteProgram"
)]
#[delete("/programs/{code}")]
pub async fn delete_program(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<DeleteParams>,
) -> ApiResult<HttpResponse> {
    let code = ProgramCode::new(path.into_inner());
    state.programs.delete(&code, query.mode()).await?;
    Ok(envelope::empty(StatusCode::OK))
}

#[cfg(test)]
mod tests;
