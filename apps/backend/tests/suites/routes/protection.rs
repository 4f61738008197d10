// Every protected route rejects a request without a session before its
// handler runs; public routes never ask for one.

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use bugshield_test_support::error_body::assert_error_body;
use serde_json::{json, Value};

use crate::support::auth::session_cookie;
use crate::support::{create_test_app, test_state};

const PROTECTED: &[(&str, &str)] = &[
    ("POST", "/service"),
    ("PUT", "/service/some-id"),
    ("DELETE", "/service/some-id"),
    ("GET", "/usersService"),
    ("GET", "/usersService?email=a@example.com"),
    ("POST", "/booking"),
    ("GET", "/usersBooking?email=a@example.com"),
    ("GET", "/otherUsersBooking?email=a@example.com"),
    ("GET", "/session"),
    ("GET", "/api/auth/session"),
];

const PUBLIC: &[&str] = &["/", "/health", "/services"];

fn request(method: &str, uri: &str) -> test::TestRequest {
    let method = Method::from_bytes(method.as_bytes()).unwrap();
    let req = test::TestRequest::default().method(method.clone()).uri(uri);
    if method == Method::POST || method == Method::PUT {
        req.set_json(json!({ "serviceName": "Termite check" }))
    } else {
        req
    }
}

#[actix_web::test]
async fn test_protected_routes_require_session() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    for (method, uri) in PROTECTED {
        let resp = test::call_service(&app, request(method, uri).to_request()).await;
        let error = assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
        assert_eq!(error.message, "unauthorized access", "{method} {uri}");
    }
}

#[actix_web::test]
async fn test_protected_routes_reject_forged_cookie() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    for (method, uri) in PROTECTED {
        let req = request(method, uri)
            .cookie(session_cookie("eyJhbGciOiJIUzI1NiJ9.e30.forged"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    }
}

#[actix_web::test]
async fn test_rejected_write_never_reaches_store() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/service")
        .set_json(json!({ "serviceName": "Termite check" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/services").to_request();
    let services: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(services.is_empty());
}

#[actix_web::test]
async fn test_public_routes_need_no_session() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    for uri in PUBLIC {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    }
}

#[actix_web::test]
async fn test_every_response_carries_request_id() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id should be present");
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id should be present");
    assert_eq!(request_id, trace_id);
}
