// Integration tests for the session lifecycle: login, session echo, logout.

use actix_web::cookie::SameSite;
use actix_web::http::StatusCode;
use actix_web::test;
use bugshield::auth::{SESSION_COOKIE, TOKEN_TTL_SECS};
use bugshield_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

use crate::common::session_cookie_of;
use crate::support::auth::login;
use crate::support::{create_test_app, test_state};

// ============================================================================
// Login
// ============================================================================

#[actix_web::test]
async fn test_login_sets_session_cookie() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({ "email": "a@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = session_cookie_of(&resp).expect("session cookie should be set");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_ne!(cookie.secure(), Some(true));
    assert_eq!(
        cookie.max_age().map(|age| age.whole_seconds()),
        Some(TOKEN_TTL_SECS)
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));
}

#[actix_web::test]
async fn test_login_alias_path() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": unique_email("alias") }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie_of(&resp).is_some());
}

// ============================================================================
// Full lifecycle
// ============================================================================

#[actix_web::test]
async fn test_login_session_logout_round_trip() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let cookie = login(&app, "a@example.com").await;

    // Session echoes the identity with its timestamps
    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = test::read_body_json(resp).await;
    assert_eq!(session["email"], "a@example.com");
    let iat = session["iat"].as_i64().expect("iat should be a number");
    let exp = session["exp"].as_i64().expect("exp should be a number");
    assert_eq!(exp - iat, TOKEN_TTL_SECS);

    // Logout clears the cookie
    let req = test::TestRequest::post()
        .uri("/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = session_cookie_of(&resp).expect("logout should clear the cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age().map(|age| age.whole_seconds()), Some(0));
    assert_eq!(cleared.path(), Some("/"));
    assert_eq!(cleared.same_site(), Some(SameSite::Strict));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true }));

    // The browser now holds the cleared cookie
    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(cleared)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "unauthorized access");
}

#[actix_web::test]
async fn test_session_alias_path() {
    let app = create_test_app(test_state().build().unwrap()).build().await;
    let email = unique_email("alias");
    let cookie = login(&app, &email).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .cookie(cookie)
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(session["email"], email);
}

#[actix_web::test]
async fn test_relogin_overwrites_session() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let first = login(&app, "first@example.com").await;
    let second = login(&app, "second@example.com").await;

    // Same name and path, so the browser replaces the first cookie
    assert_eq!(first.name(), SESSION_COOKIE);
    assert_eq!(second.name(), SESSION_COOKIE);
    assert_eq!(first.path(), Some("/"));
    assert_eq!(second.path(), Some("/"));
    assert_ne!(first.value(), second.value());

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(second)
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(session["email"], "second@example.com");
}

#[actix_web::test]
async fn test_login_keeps_extra_attributes_not_timestamps() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/jwt")
        .set_json(json!({
            "email": "a@example.com",
            "name": "Ada",
            "iat": 1,
            "exp": 9_999_999_999i64,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie_of(&resp).expect("session cookie should be set");

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(cookie)
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(session["name"], "Ada");
    let iat = session["iat"].as_i64().unwrap();
    let exp = session["exp"].as_i64().unwrap();
    assert_ne!(iat, 1);
    assert_eq!(exp - iat, TOKEN_TTL_SECS);
}

// ============================================================================
// Logout edge cases
// ============================================================================

#[actix_web::test]
async fn test_logout_without_session_still_clears() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = session_cookie_of(&resp).expect("logout should clear the cookie");
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn test_logout_alias_path_ignores_body() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .set_json(json!({ "email": "a@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

/// Logout is stateless: a copy of the token captured before logout keeps
/// verifying until it expires.
#[actix_web::test]
async fn test_replayed_token_after_logout_still_verifies() {
    let app = create_test_app(test_state().build().unwrap()).build().await;
    let cookie = login(&app, "a@example.com").await;

    let req = test::TestRequest::post()
        .uri("/logout")
        .cookie(cookie.clone())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/session")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
