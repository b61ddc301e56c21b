//! Tests for program handlers.

use super::*;
use crate::domain::ports::CreateProgramRequest;
use crate::domain::{EntityId, EntityName, Error, ProgramCategory, PublicId, RegistryRef};
use crate::inbound::http::test_utils::{MockPorts, bearer_header};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

const BOUNDARY: &str = "registry-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_content_type() -> (actix_web::http::header::HeaderName, String) {
    (
        CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

fn test_app(
    ports: MockPorts,
    max_upload_bytes: usize,
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
        .app_data(web::Data::new(
            ports.into_state().with_max_upload_bytes(max_upload_bytes),
        ))
        .service(
            web::scope("/api/v1")
                .service(create_program)
                .service(list_programs)
                .service(get_program)
                .service(delete_program),
        )
}

fn program(code: &str) -> Program {
    Program {
        id: EntityId::generate(),
        code: ProgramCode::new(code),
        name: EntityName::new("Payroll").expect("valid name"),
        users: vec!["ada".to_owned()],
        departments: vec![RegistryRef {
            id: EntityId::generate(),
            public_id: PublicId::generate(),
            name: "Finance".to_owned(),
        }],
        directorates: Vec::new(),
        category: ProgramCategory::ProcessBased,
    }
}

#[rstest]
#[actix_web::test]
async fn create_forwards_decoded_form() {
    let department = PublicId::generate();
    let directorate = PublicId::generate();
    let mut ports = MockPorts::authorised();
    ports
        .programs
        .expect_create()
        .withf(move |request: &CreateProgramRequest| {
            request.name.as_ref() == "Payroll"
                && request.department_ids == vec![department]
                && request.directorate_ids == vec![directorate]
                && request.category == ProgramCategory::ProcessBased
                && request
                    .artifact
                    .as_ref()
                    .is_some_and(|file| file.original_name == "brief.pdf" && file.bytes == b"%PDF")
        })
        .returning(|_| Ok(ProgramCode::new("SB0001")));
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let departments = format!("[\"{department}\"]");
    let directorates = format!("[\"{directorate}\"]");
    let body = multipart_body(&[
        Part::Text("name", "Payroll"),
        Part::Text("departments", &departments),
        Part::Text("directorates", &directorates),
        Part::Text("processBased", "True"),
        Part::Text("users", "[\"ada\"]"),
        Part::File("brief.pdf", b"%PDF"),
    ]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header(bearer_header())
        .insert_header(multipart_content_type())
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn create_requires_bearer_token() {
    let mut ports = MockPorts::authorised();
    ports.programs.expect_create().never();
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[Part::Text("name", "Payroll")]))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn oversized_upload_is_rejected() {
    let mut ports = MockPorts::authorised();
    ports.programs.expect_create().never();
    let app = actix_test::init_service(test_app(ports, 4)).await;

    let body = multipart_body(&[
        Part::Text("name", "Payroll"),
        Part::File("brief.pdf", b"far too many bytes"),
    ]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header(bearer_header())
        .insert_header(multipart_content_type())
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn non_multipart_body_is_a_bad_request() {
    let mut ports = MockPorts::authorised();
    ports.programs.expect_create().never();
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header(bearer_header())
        .set_json(json!({"name": "Payroll"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status"), Some(&json!("error")));
}

#[rstest]
#[actix_web::test]
async fn missing_file_surfaces_service_error() {
    let mut ports = MockPorts::authorised();
    ports
        .programs
        .expect_create()
        .withf(|request: &CreateProgramRequest| request.artifact.is_none())
        .returning(|_| Err(Error::invalid_request("File is required")));
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let departments = format!("[\"{}\"]", PublicId::generate());
    let directorates = format!("[\"{}\"]", PublicId::generate());
    let body = multipart_body(&[
        Part::Text("name", "Payroll"),
        Part::Text("departments", &departments),
        Part::Text("directorates", &directorates),
    ]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/programs")
        .insert_header(bearer_header())
        .insert_header(multipart_content_type())
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("File is required")));
}

#[rstest]
#[actix_web::test]
async fn programs_serialise_in_camel_case() {
    let mut ports = MockPorts::default();
    ports
        .programs
        .expect_find()
        .withf(|code| code.as_str() == "SB0001")
        .returning(|code| Ok(program(code.as_str())));
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/programs/SB0001")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body.pointer("/data/code"), Some(&json!("SB0001")));
    assert_eq!(body.pointer("/data/processBased"), Some(&json!(true)));
    assert_eq!(body.pointer("/data/departments/0/name"), Some(&json!("Finance")));
    assert_eq!(body.pointer("/data/directorates"), Some(&json!([])));
}

#[rstest]
#[actix_web::test]
async fn empty_catalogue_omits_data() {
    let mut ports = MockPorts::default();
    ports.programs.expect_list().returning(|| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports, 1024)).await;

    let request = actix_test::TestRequest::get().uri("/api/v1/programs").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("data").is_none());
}
