//! Integration tests for login and access token verification

mod common;

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::json;

use ag_api::create_app;
use ag_api::dto::{TokenResponse, VerifyResponse};
use ag_core::domain::AuditEventType;
use ag_shared::ErrorResponse;

use common::*;

#[actix_web::test]
async fn test_login_sets_cookies_and_returns_pair() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, login_request().to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let access = response_cookie(&resp, ACCESS_COOKIE).unwrap();
    let refresh = response_cookie(&resp, REFRESH_COOKIE).unwrap();
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(access.max_age(), Some(Duration::seconds(60)));
    assert_eq!(refresh.http_only(), Some(true));
    assert_eq!(refresh.max_age(), Some(Duration::seconds(3600)));

    let body: TokenResponse = test::read_body_json(resp).await;
    assert_eq!(body.token_type, "Bearer");
    assert_eq!(body.access_token, access.value());
    assert_eq!(body.refresh_token, refresh.value());
    assert_eq!(body.access_expires_in, 60);
    assert_eq!(body.refresh_expires_in, 3600);

    let issued = ctx.audit.events_of(AuditEventType::SessionIssued);
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].subject.as_deref(), Some("user-alice"));
}

#[actix_web::test]
async fn test_login_with_wrong_password() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "alice", "password": "guess"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(response_cookie(&resp, ACCESS_COOKIE).is_none());
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_credentials");
}

#[actix_web::test]
async fn test_login_when_identity_service_is_down() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "offline", "password": "whatever"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "identity_service_unavailable");
}

#[actix_web::test]
async fn test_login_validation() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "  ", "password": "wonderland"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "validation_error");
    assert!(body.message.contains("username"));

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "alice", "password": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.message.contains("password"));
    assert!(!body.message.contains("username"));

    let req = test::TestRequest::post()
        .uri("/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "validation_error");
}

#[actix_web::test]
async fn test_verify_with_cookie_and_with_bearer() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let tokens: TokenResponse = test::call_and_read_body_json(&app, login_request().to_request()).await;

    let req = test::TestRequest::get()
        .uri("/verify")
        .cookie(Cookie::new(ACCESS_COOKIE, tokens.access_token.clone()))
        .to_request();
    let body: VerifyResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.subject, "user-alice");
    assert_eq!(body.session_id, tokens.session_id);

    let req = test::TestRequest::get()
        .uri("/verify")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_verify_failure_kinds_are_distinct() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let tokens: TokenResponse = test::call_and_read_body_json(&app, login_request().to_request()).await;

    let cases = vec![
        (None, "token_missing"),
        (Some("not-a-jwt".to_string()), "token_malformed"),
        (Some(tokens.refresh_token.clone()), "token_wrong_type"),
    ];

    for (token, expected) in cases {
        let mut req = test::TestRequest::get().uri("/verify");
        if let Some(token) = token {
            req = req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, expected);
    }
}

#[actix_web::test]
async fn test_verify_fails_closed_when_store_is_down() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let tokens: TokenResponse = test::call_and_read_body_json(&app, login_request().to_request()).await;

    ctx.store.set_should_fail(true);
    let req = test::TestRequest::get()
        .uri("/verify")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", tokens.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "authentication_unavailable");
}

#[actix_web::test]
async fn test_security_headers_on_responses() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, login_request().to_request()).await;
    let headers = resp.headers();
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
}
