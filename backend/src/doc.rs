//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every registry endpoint, the envelope schemas and
//! the `BearerAuth` security scheme. Handlers document their paths under
//! `/api/v1`; [`openapi_for_version`] rewrites that prefix when the server
//! runs a different API version. The document backs Swagger UI and the
//! `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::auth::{LoginRequest, TokenResponse};
use crate::inbound::http::departments::{CreateDepartmentRequest, DepartmentResponse};
use crate::inbound::http::directorates::{CreateDirectorateRequest, DirectorateResponse};
use crate::inbound::http::envelope::{EnvelopeStatus, ErrorEnvelope, SuccessEnvelope};
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::programs::ProgramResponse;
use crate::inbound::http::reference::ReferenceResponse;
use crate::inbound::http::schemas::CreateProgramForm;
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

const DOCUMENTED_PREFIX: &str = "/api/v1";

/// Register the bearer token scheme issued by `POST /auth/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the registry API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Organisation registry API",
        description = "Users, departments, directorates and programs with generated program codes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::get_department,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::directorates::create_directorate,
        crate::inbound::http::directorates::list_directorates,
        crate::inbound::http::directorates::get_directorate,
        crate::inbound::http::directorates::delete_directorate,
        crate::inbound::http::programs::create_program,
        crate::inbound::http::programs::list_programs,
        crate::inbound::http::programs::get_program,
        crate::inbound::http::programs::delete_program,
    ),
    components(schemas(
        SuccessEnvelope,
        ErrorEnvelope,
        EnvelopeStatus,
        ErrorCode,
        HealthStatus,
        LoginRequest,
        TokenResponse,
        UserResponse,
        CreateUserRequest,
        DepartmentResponse,
        CreateDepartmentRequest,
        DirectorateResponse,
        CreateDirectorateRequest,
        ReferenceResponse,
        ProgramResponse,
        CreateProgramForm,
    )),
    tags(
        (name = "health", description = "Status and orchestration probes"),
        (name = "auth", description = "Bearer token issue"),
        (name = "users", description = "User accounts"),
        (name = "departments", description = "Departments"),
        (name = "directorates", description = "Directorate hierarchy"),
        (name = "programs", description = "Programs and their generated codes")
    )
)]
pub struct ApiDoc;

/// Build the document with paths under `/api/v{version}`.
///
/// # Examples
/// ```
/// use org_registry::doc::openapi_for_version;
///
/// let doc = openapi_for_version("2");
/// assert!(doc.paths.paths.contains_key("/api/v2/programs"));
/// ```
#[must_use]
pub fn openapi_for_version(version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = format!("/api/v{version}");
    if prefix == DOCUMENTED_PREFIX {
        return doc;
    }
    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
            Some(rest) => (format!("{prefix}{rest}"), item),
            None => (path, item),
        })
        .collect();
    doc
}

#[cfg(test)]
mod tests {
    //! Coverage for the generated document.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/v1/auth/login")]
    #[case("/api/v1/health")]
    #[case("/api/v1/users/{uuid}")]
    #[case("/api/v1/departments/{uuid}")]
    #[case("/api/v1/directorates")]
    #[case("/api/v1/programs/{code}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
        assert!(components.schemas.contains_key("ErrorEnvelope"));
    }

    #[rstest]
    fn version_rewrite_leaves_probes_alone() {
        let doc = openapi_for_version("3");
        assert!(doc.paths.paths.contains_key("/api/v3/departments"));
        assert!(!doc.paths.paths.contains_key("/api/v1/departments"));
        assert!(doc.paths.paths.contains_key("/health/live"));
    }
}
