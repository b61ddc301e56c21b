//! Department handlers. Reads are public; writes need a bearer token.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Department, PublicId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{self, ErrorEnvelope};
use crate::inbound::http::params::DeleteParams;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_entity_name, parse_public_id};

const UUID_PARAM: FieldName = FieldName::new("uuid");
const NAME_FIELD: FieldName = FieldName::new("name");

/// Department as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    #[schema(value_type = String, format = Uuid)]
    pub uuid: PublicId,
    #[schema(example = "Finance")]
    pub name: String,
}

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            uuid: department.public_id(),
            name: department.name().to_string(),
        }
    }
}

/// Creation body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDepartmentRequest {
    #[schema(example = "Finance")]
    pub name: String,
}

/// Create a department.
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created"),
        (status = 400, description = "Invalid name", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 409, description = "Name taken", body = ErrorEnvelope)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/departments")]
pub async fn create_department(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<CreateDepartmentRequest>,
) -> ApiResult<HttpResponse> {
    let name = parse_entity_name(&payload.name, NAME_FIELD)?;
    state.departments.create(name).await?;
    Ok(envelope::created())
}

/// List live departments.
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Departments", body = [DepartmentResponse]),
        (status = 404, description = "No departments", body = ErrorEnvelope)
    ),
    tags = ["departments"],
    operation_id = "listDepartments",
    security([])
)]
#[get("/departments")]
pub async fn list_departments(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let departments = state.departments.list().await?;
    let body: Vec<DepartmentResponse> =
        departments.iter().map(DepartmentResponse::from).collect();
    envelope::ok(&body)
}

/// Fetch one department.
#[utoipa::path(
    get,
    path = "/api/v1/departments/{uuid}",
    params(("uuid" = String, Path, description = "Department public id")),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown department", body = ErrorEnvelope)
    ),
    tags = ["departments"],
    operation_id = "getDepartment",
    security([])
)]
#[get("/departments/{uuid}")]
pub async fn get_department(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    let department = state.departments.find(public_id).await?;
    envelope::ok(&DepartmentResponse::from(&department))
}

/// Delete a department; soft unless `?soft=false`.
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{uuid}",
    params(("uuid" = String, Path, description = "Department public id"), DeleteParams),
    responses(
        (status = 200, description = "Department deleted"),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown department", body = ErrorEnvelope)
    ),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[delete("/departments/{uuid}")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<DeleteParams>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    state.departments.delete(public_id, query.mode()).await?;
    Ok(envelope::empty(StatusCode::OK))
}
