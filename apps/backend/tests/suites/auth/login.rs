// Integration tests for POST /api/users/login.

use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use howler::auth::claims::SessionClaims;
use howler::auth::encoding::{decode_json, split_segments};
use howler::UserIdentity;
use howler_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};

use crate::support::auth::{alice, build_test_state, test_security, ALICE_PASSWORD, BOB_PASSWORD};
use crate::support::create_test_app;

const LOGIN: &str = "/api/users/login";

// ============================================================================
// Happy Path Tests
// ============================================================================

#[actix_web::test]
async fn test_login_sets_cookie_and_returns_user() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state(test_security()).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri(LOGIN)
        .set_json(json!({"username": "alice", "password": ALICE_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "currentUser")
        .expect("login should set the session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(600));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"user": serde_json::to_value(alice())?}));
    assert!(body["user"].get("password").is_none());

    // The cookie opens the gated endpoint
    let req = test::TestRequest::get()
        .uri("/api/users/current")
        .cookie(cookie)
        .to_request();
    let current: UserIdentity = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current, alice());
    Ok(())
}

#[actix_web::test]
async fn test_login_token_window_matches_config() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security().with_ttl(Duration::from_secs(90));
    let app = create_test_app(build_test_state(security).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri(LOGIN)
        .set_json(json!({"username": "bob", "password": BOB_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .next()
        .expect("login should set a cookie")
        .into_owned();
    assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(90));

    let (_, payload, _) = split_segments(cookie.value()).expect("three segments");
    let claims: SessionClaims = decode_json(payload).expect("payload decodes");
    assert_eq!(claims.exp - claims.iat, 90);
    assert_eq!(claims.user["username"], "bob");
    Ok(())
}

// ============================================================================
// Validation and Credential Errors
// ============================================================================

#[actix_web::test]
async fn test_login_missing_fields_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state(test_security()).await)
        .with_prod_routes()
        .build()
        .await?;

    let bodies = [
        json!({}),
        json!({"username": "alice"}),
        json!({"password": ALICE_PASSWORD}),
        json!({"username": "", "password": ALICE_PASSWORD}),
        json!({"username": "alice", "password": ""}),
    ];

    for body in bodies {
        let req = test::TestRequest::post()
            .uri(LOGIN)
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(
            resp.headers().get(header::SET_COOKIE).is_none(),
            "no cookie for {body}"
        );

        assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED",
            StatusCode::UNAUTHORIZED,
            Some("Not authenticated"),
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn test_wrong_password_and_unknown_user_match() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state(test_security()).await)
        .with_prod_routes()
        .build()
        .await?;

    let mut problems = Vec::new();
    for (username, password) in [("alice", "not-her-password"), ("mallory", ALICE_PASSWORD)] {
        let req = test::TestRequest::post()
            .uri(LOGIN)
            .set_json(json!({"username": username, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().get(header::SET_COOKIE).is_none());

        let problem = assert_problem_details_from_service_response(
            resp,
            "INVALID_CREDENTIALS",
            StatusCode::BAD_REQUEST,
            Some("Invalid username or password"),
        )
        .await;
        problems.push(problem);
    }

    assert_eq!(problems[0].title, problems[1].title);
    assert_eq!(problems[0].detail, problems[1].detail);
    assert_eq!(problems[0].type_, problems[1].type_);
    Ok(())
}

#[actix_web::test]
async fn test_login_malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state(test_security()).await)
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri(LOGIN)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON body"),
    )
    .await;
    Ok(())
}
