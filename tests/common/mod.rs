// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use gym_tracker::config::Config;
use gym_tracker::db::Database;
use gym_tracker::middleware::auth::Claims;
use gym_tracker::models::{BodyRegion, CreateExerciseInput, Exercise};
use gym_tracker::routes::create_router;
use gym_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Create a test app over a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Database::in_memory()
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(config, db).expect("Failed to build state"));

    (create_router(state.clone()), state)
}

/// Create a session token for a user, shaped like the identity provider's.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, signing_key: &[u8]) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 60 * 60,
        aud: Some("authenticated".to_string()),
        email: Some("lifter@example.com".to_string()),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(signing_key),
    )
    .expect("Failed to sign JWT")
}

/// Build a request carrying a bearer token and an optional JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON response body (`Null` when empty).
#[allow(dead_code)]
pub async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Insert an exercise directly through the database layer.
#[allow(dead_code)]
pub async fn create_exercise(state: &AppState, name: &str, bodypart: &str) -> Exercise {
    let input = CreateExerciseInput {
        name: name.to_string(),
        body_region: BodyRegion::Upper,
        primary_bodypart: bodypart.to_string(),
        secondary_bodypart: None,
        category: Some("Strength".to_string()),
        level: None,
    };
    state.db.create_exercise(None, &input).await.unwrap()
}
