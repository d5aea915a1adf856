#![allow(dead_code)]

use actix_web::http::header::HeaderMap;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    howler_test_support::logging::init();
}

/// The `x-request-id` set by `RequestTrace` must match the id rendered into
/// error bodies.
pub fn assert_request_id_matches_trace_id(headers: &HeaderMap) {
    let request_id = headers
        .get("x-request-id")
        .expect("x-request-id header should be present")
        .to_str()
        .expect("x-request-id should be valid UTF-8");
    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id should be valid UTF-8");

    assert_eq!(request_id, trace_id);
    assert_ne!(trace_id, "unknown", "error rendered outside the request scope");
}
