//! Directorate handlers. Reads are public and tree-populated; writes need a
//! bearer token.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DirectorateNode, PublicId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{self, ErrorEnvelope};
use crate::inbound::http::params::DeleteParams;
use crate::inbound::http::reference::ReferenceResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_entity_name, parse_public_id};

const UUID_PARAM: FieldName = FieldName::new("uuid");
const NAME_FIELD: FieldName = FieldName::new("name");
const PARENT_FIELD: FieldName = FieldName::new("parent");

/// Directorate with its parent and children summaries.
///
/// `parent` is omitted for roots and `children` is omitted when empty.
#[derive(Debug, Serialize, ToSchema)]
pub struct DirectorateResponse {
    #[schema(value_type = String, format = Uuid)]
    pub uuid: PublicId,
    #[schema(example = "Operations")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ReferenceResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReferenceResponse>,
}

impl From<&DirectorateNode> for DirectorateResponse {
    fn from(node: &DirectorateNode) -> Self {
        Self {
            uuid: node.directorate.public_id(),
            name: node.directorate.name().to_string(),
            parent: node.parent.as_ref().map(ReferenceResponse::from),
            children: node.children.iter().map(ReferenceResponse::from).collect(),
        }
    }
}

/// Creation body. `parent` is the public id of an existing directorate.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDirectorateRequest {
    #[schema(example = "Operations")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = Uuid)]
    pub parent: Option<String>,
}

/// Create a directorate, optionally under a parent.
#[utoipa::path(
    post,
    path = "/api/v1/directorates",
    request_body = CreateDirectorateRequest,
    responses(
        (status = 201, description = "Directorate created"),
        (status = 400, description = "Invalid name or parent id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown parent", body = ErrorEnvelope),
        (status = 409, description = "Name taken", body = ErrorEnvelope)
    ),
    tags = ["directorates"],
    operation_id = "createDirectorate"
)]
#[post("/directorates")]
pub async fn create_directorate(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<CreateDirectorateRequest>,
) -> ApiResult<HttpResponse> {
    let CreateDirectorateRequest { name, parent } = payload.into_inner();
    let name = parse_entity_name(&name, NAME_FIELD)?;
    // A blank parent is treated as absent.
    let parent = parent
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_public_id(&raw, PARENT_FIELD))
        .transpose()?;
    state.directorates.create(name, parent).await?;
    Ok(envelope::created())
}

/// List live directorates with their relations.
#[utoipa::path(
    get,
    path = "/api/v1/directorates",
    responses(
        (status = 200, description = "Directorates", body = [DirectorateResponse]),
        (status = 404, description = "No directorates", body = ErrorEnvelope),
        (status = 500, description = "Corrupt hierarchy", body = ErrorEnvelope)
    ),
    tags = ["directorates"],
    operation_id = "listDirectorates",
    security([])
)]
#[get("/directorates")]
pub async fn list_directorates(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let nodes = state.directorates.list().await?;
    let body: Vec<DirectorateResponse> = nodes.iter().map(DirectorateResponse::from).collect();
    envelope::ok(&body)
}

/// Fetch one directorate with its relations.
#[utoipa::path(
    get,
    path = "/api/v1/directorates/{uuid}",
    params(("uuid" = String, Path, description = "Directorate public id")),
    responses(
        (status = 200, description = "Directorate", body = DirectorateResponse),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown directorate", body = ErrorEnvelope)
    ),
    tags = ["directorates"],
    operation_id = "getDirectorate",
    security([])
)]
#[get("/directorates/{uuid}")]
pub async fn get_directorate(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    let node = state.directorates.find(public_id).await?;
    envelope::ok(&DirectorateResponse::from(&node))
}

/// Delete a childless directorate; soft unless `?soft=false`.
#[utoipa::path(
    delete,
    path = "/api/v1/directorates/{uuid}",
    params(("uuid" = String, Path, description = "Directorate public id"), DeleteParams),
    responses(
        (status = 200, description = "Directorate deleted"),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown directorate", body = ErrorEnvelope),
        (status = 409, description = "Directorate still has children", body = ErrorEnvelope)
    ),
    tags = ["directorates"],
    operation_id = "deleteDirectorate"
)]
#[delete("/directorates/{uuid}")]
pub async fn delete_directorate(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<DeleteParams>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    state.directorates.delete(public_id, query.mode()).await?;
    Ok(envelope::empty(StatusCode::OK))
}
