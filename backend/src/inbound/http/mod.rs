//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod departments;
pub mod directorates;
pub mod envelope;
pub mod error;
pub mod health;
pub mod multipart;
pub mod params;
pub mod programs;
pub mod reference;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

use crate::domain::Error;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Versioned API scope with every registry endpoint mounted.
///
/// Extractor failures (bad JSON, bad query strings) are reported through the
/// error envelope rather than actix's plain-text defaults.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use org_registry::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope("1"));
/// ```
#[must_use]
pub fn api_scope(version: &str) -> Scope {
    web::scope(&format!("/api/v{version}"))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(health::status)
        .service(auth::login)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::delete_user)
        .service(departments::create_department)
        .service(departments::list_departments)
        .service(departments::get_department)
        .service(departments::delete_department)
        .service(directorates::create_directorate)
        .service(directorates::list_directorates)
        .service(directorates::get_directorate)
        .service(directorates::delete_directorate)
        .service(programs::create_program)
        .service(programs::list_programs)
        .service(programs::get_program)
        .service(programs::delete_program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, bearer_header};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_uses_error_envelope() {
        let mut ports = MockPorts::authorised();
        ports.departments.expect_create().never();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(api_scope("1")),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(bearer_header())
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body.get("status"), Some(&json!("error")));
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
    }

    #[rstest]
    #[actix_web::test]
    async fn scope_honours_configured_version() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .service(api_scope("2")),
        )
        .await;

        let request = test::TestRequest::get().uri("/api/v2/health").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
