// Integration tests for rejected sessions and rejected logins.

use actix_web::http::StatusCode;
use actix_web::test;
use bugshield::state::security_config::SecurityConfig;
use bugshield_test_support::error_body::assert_error_body;
use serde_json::json;

use crate::support::auth::{issue_expired_token, issue_test_token, session_cookie};
use crate::support::{create_test_app, test_state};

// ============================================================================
// Session rejections
// ============================================================================

#[actix_web::test]
async fn test_missing_cookie_is_unauthorized() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let resp = test::call_service(&app, req).await;

    let error = assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(error.message, "unauthorized access");
}

#[actix_web::test]
async fn test_missing_and_malformed_cookie_look_identical() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get().uri("/session").to_request();
    let missing = assert_error_body(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(session_cookie("not-a-token"))
        .to_request();
    let malformed = assert_error_body(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
    )
    .await;

    assert_eq!(missing.message, malformed.message);
    assert_eq!(missing.code, malformed.code);
    assert_ne!(missing.trace_id, malformed.trace_id);
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let sec = SecurityConfig::new(crate::support::TEST_SECRET);
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(session_cookie(issue_expired_token("a@example.com", &sec)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let error = assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(error.message, "unauthorized access");
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let foreign = SecurityConfig::new("another_secret_key_that_is_long_enough!".as_bytes());
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(session_cookie(issue_test_token("a@example.com", &foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[actix_web::test]
async fn test_empty_cookie_is_unauthorized() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(session_cookie(""))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ============================================================================
// Login rejections
// ============================================================================

#[actix_web::test]
async fn test_login_without_email_is_bad_request() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(crate::common::session_cookie_of(&resp).is_none());
    assert_error_body(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL").await;
}

#[actix_web::test]
async fn test_login_with_malformed_email_is_bad_request() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    for email in [json!(""), json!("not-an-email"), json!(42)] {
        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(json!({ "email": email }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_error_body(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL").await;
    }
}

#[actix_web::test]
async fn test_login_with_non_object_body_is_bad_request() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!(["a@example.com"]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_body(resp, StatusCode::BAD_REQUEST, "INVALID_DOCUMENT").await;
}
