// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session handling tests.
//!
//! These tests verify that:
//! 1. API routes reject requests without a valid session (401)
//! 2. Page routes redirect to the login page instead
//! 3. The session cookie is accepted and cleared on logout
//! 4. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_api_route_without_token() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        Request::builder()
            .uri("/api/sets")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_api_route_with_invalid_token() {
    let (app, _) = common::create_test_app().await;

    let (status, _) = common::send(
        &app,
        common::request("GET", "/api/sets", "invalid.token.here", None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_from_cookie() {
    let (app, state) = common::create_test_app().await;
    let user = Uuid::new_v4();
    let token = common::create_test_jwt(user, &state.config.jwt_signing_key);

    let (status, body) = common::send(
        &app,
        Request::builder()
            .uri("/api/session")
            .header(header::COOKIE, format!("sb-access-token={}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], user.to_string());
    assert_eq!(body["data"]["email"], "lifter@example.com");
}

#[tokio::test]
async fn test_page_without_session_redirects_to_login() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/protected/dashboard/calendar?month=2026-03")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/auth/login?next=%2Fprotected%2Fdashboard%2Fcalendar%3Fmonth%3D2026-03"
    );
}

#[tokio::test]
async fn test_login_forwards_to_identity_provider() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/login?next=%2Fprotected%2Fsettings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://localhost:3000/auth/login?next=%2Fprotected%2Fsettings"
    );

    // Off-site targets are dropped
    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/login?next=https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://localhost:3000/auth/login"
    );
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("sb-access-token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/sets")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_token_audience_must_match_config() {
    let (app, state) = common::create_test_app().await;
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = gym_tracker::middleware::auth::Claims {
        sub: Uuid::new_v4().to_string(),
        iat: now,
        exp: now + 600,
        aud: Some("service_role".to_string()),
        email: None,
    };
    let foreign = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(&state.config.jwt_signing_key),
    )
    .unwrap();

    let (status, _) = common::send(&app, common::request("GET", "/api/session", &foreign, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Provider tokens carry `aud: authenticated`
    let token = common::create_test_jwt(Uuid::new_v4(), &state.config.jwt_signing_key);
    let (status, _) = common::send(&app, common::request("GET", "/api/session", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
}
