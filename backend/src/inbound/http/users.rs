//! User account handlers. Every route requires a bearer token.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{uuid}
//! POST   /api/v1/users {"username":"ada","password":"Passw0rd"}
//! DELETE /api/v1/users/{uuid}?soft=false
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PublicId, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{self, ErrorEnvelope};
use crate::inbound::http::params::DeleteParams;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_public_id};

const UUID_PARAM: FieldName = FieldName::new("uuid");

/// Public view of a user account. The password hash never leaves the domain.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub uuid: PublicId,
    #[schema(example = "ada")]
    pub username: String,
    pub deleted: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.public_id(),
            username: user.username().as_str().to_owned(),
            deleted: false,
        }
    }
}

/// Registration body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "Passw0rd")]
    pub password: String,
}

/// List live users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "No users", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let users = state.users.list().await?;
    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    envelope::ok(&body)
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = String, Path, description = "User public id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{uuid}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    let user = state.users.find(public_id).await?;
    envelope::ok(&UserResponse::from(&user))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Username or password rejected", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 409, description = "Username taken", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest { username, password } = payload.into_inner();
    state.users.create(&username, &password).await?;
    Ok(envelope::created())
}

/// Delete a user; soft unless `?soft=false`.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{uuid}",
    params(("uuid" = String, Path, description = "User public id"), DeleteParams),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{uuid}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<DeleteParams>,
) -> ApiResult<HttpResponse> {
    let public_id = parse_public_id(&path, UUID_PARAM)?;
    state.users.delete(public_id, query.mode()).await?;
    Ok(envelope::empty(actix_web::http::StatusCode::OK))
}

#[cfg(test)]
mod tests;
