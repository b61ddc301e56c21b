//! Tests for user account handlers.

use super::*;
use crate::domain::{DeleteMode, Error, PasswordHash, Username};
use crate::inbound::http::test_utils::{MockPorts, bearer_header};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn user(name: &str) -> User {
    User::new(Username::from_stored(name), PasswordHash::new("$argon2id$hash"))
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .service(
            web::scope("/api/v1")
                .service(list_users)
                .service(get_user)
                .service(create_user)
                .service(delete_user),
        )
}

#[rstest]
#[actix_web::test]
async fn listing_requires_a_bearer_token() {
    let mut ports = MockPorts::authorised();
    ports.users.expect_list().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::get().uri("/api/v1/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn listing_hides_password_hashes() {
    let mut ports = MockPorts::authorised();
    ports
        .users
        .expect_list()
        .returning(|| Ok(vec![user("ada"), user("grace")]));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer_header())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    let users = body.get("data").and_then(Value::as_array).expect("data array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].get("username"), Some(&json!("ada")));
    assert_eq!(users[0].get("deleted"), Some(&json!(false)));
    assert!(users[0].get("passwordHash").is_none());
    assert!(users[0].get("password_hash").is_none());
}

#[rstest]
#[actix_web::test]
async fn malformed_uuid_is_a_bad_request() {
    let mut ports = MockPorts::authorised();
    ports.users.expect_find().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/not-a-uuid")
        .insert_header(bearer_header())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/details/field"), Some(&json!("uuid")));
}

#[rstest]
#[actix_web::test]
async fn create_answers_201_without_data() {
    let mut ports = MockPorts::authorised();
    ports
        .users
        .expect_create()
        .withf(|username, password| username == "ada" && password == "Passw0rd")
        .returning(|username, _| Ok(user(username)));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer_header())
        .set_json(CreateUserRequest {
            username: "ada".into(),
            password: "Passw0rd".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("data").is_none());
}

#[rstest]
#[actix_web::test]
async fn create_surfaces_policy_rejections() {
    let mut ports = MockPorts::authorised();
    ports
        .users
        .expect_create()
        .returning(|_, _| Err(Error::invalid_request("Password is invalid")));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer_header())
        .set_json(CreateUserRequest {
            username: "ada".into(),
            password: "weak".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("Password is invalid")));
}

#[rstest]
#[case("", DeleteMode::Soft)]
#[case("?soft=false", DeleteMode::Hard)]
#[actix_web::test]
async fn delete_forwards_mode(#[case] query: &str, #[case] expected: DeleteMode) {
    let target = PublicId::generate();
    let mut ports = MockPorts::authorised();
    ports
        .users
        .expect_delete()
        .withf(move |id, mode| *id == target && *mode == expected)
        .times(1)
        .returning(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{target}{query}"))
        .insert_header(bearer_header())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}
