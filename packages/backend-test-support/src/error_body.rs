//! Error body test helpers
//!
//! Assert the `{message, code, trace_id}` error contract without depending on
//! backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Local mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub message: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert status, code and trace id parity, returning the parsed body for
/// further checks.
///
/// - HTTP status matches expected
/// - x-trace-id header exists and matches body trace_id
/// - `code` matches expected
pub async fn assert_error_body(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ErrorBodyLike {
    assert_eq!(resp.status(), expected_status);

    let trace_id_header = resp
        .headers()
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8")
        .to_string();

    let body = actix_web::test::read_body(resp).await;
    let error: ErrorBodyLike =
        serde_json::from_slice(&body).expect("Response body should be a JSON error body");

    assert_eq!(
        error.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_ne!(error.trace_id, "unknown", "trace_id should come from the request");
    assert_eq!(error.code, expected_code);

    error
}
