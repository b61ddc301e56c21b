//! Bearer-token extractor guarding write endpoints.
//!
//! Handlers that take an [`AuthenticatedUser`] argument reject requests
//! without a valid `Authorization: Bearer <token>` header with
//! `401 Unauthorized` before any handler code runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{AuthClaims, Error, PublicId};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Claims of the caller, verified from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(AuthClaims);

impl AuthenticatedUser {
    /// Public id of the caller.
    #[must_use]
    pub fn public_id(&self) -> PublicId {
        self.0.sub
    }

    /// Username embedded in the token.
    #[must_use]
    pub fn username(&self) -> &str {
        self.0.username.as_str()
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Malformed authorization header"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("Missing bearer token"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    state.login.authenticate(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockLoginService;
    use crate::inbound::http::test_utils::state_with_login;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    fn claims() -> AuthClaims {
        AuthClaims {
            sub: PublicId::generate(),
            username: "ada".to_owned(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username().to_owned())
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer "))]
    #[actix_web::test]
    async fn requests_without_bearer_token_are_unauthorised(#[case] header: Option<&str>) {
        let mut login = MockLoginService::new();
        login.expect_authenticate().never();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_login(login)))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_token_yields_claims() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .withf(|token| token == "good")
            .returning(|_| Ok(claims()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_login(login)))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer good"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body.as_ref(), b"ada");
    }

    #[::core::prelude::v1::test]
    fn bearer_prefix_is_required() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Token abc"))
            .to_http_request();
        let err = bearer_token(&req).expect_err("wrong scheme");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
