// The JSON error contract: {message, code, trace_id} with a matching
// x-trace-id header, for errors raised in middleware, extractors and handlers.

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use bugshield::error::AppError;
use bugshield::ErrorCode;
use bugshield_test_support::error_body::assert_error_body;

use crate::support::{create_test_app, test_state};

async fn fail_with_store_error() -> Result<HttpResponse, AppError> {
    Err(AppError::store("connection reset by peer at 10.0.0.7"))
}

async fn fail_with_validation() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(ErrorCode::InvalidDocument, "price must be a number"))
}

#[actix_web::test]
async fn test_server_errors_hide_details() {
    let app = create_test_app(test_state().build().unwrap())
        .with_routes(|cfg| {
            cfg.route("/boom", web::get().to(fail_with_store_error));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/boom").to_request();
    let resp = test::call_service(&app, req).await;

    let error =
        assert_error_body(resp, StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR").await;
    assert!(!error.message.contains("10.0.0.7"));
}

#[actix_web::test]
async fn test_client_errors_carry_detail() {
    let app = create_test_app(test_state().build().unwrap())
        .with_routes(|cfg| {
            cfg.route("/invalid", web::get().to(fail_with_validation));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/invalid").to_request();
    let resp = test::call_service(&app, req).await;

    let error = assert_error_body(resp, StatusCode::BAD_REQUEST, "INVALID_DOCUMENT").await;
    assert_eq!(error.message, "price must be a number");
}
