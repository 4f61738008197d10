use actix_web::test;
use serde_json::Value;

use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn test_root_banner() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert_eq!(body, "bug shield server is running");
}

#[actix_web::test]
async fn test_health_reports_version_and_time() {
    let app = create_test_app(test_state().build().unwrap()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
}
