// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod auth;
pub mod exercises;
pub mod pages;
pub mod preferences;
pub mod profile;
pub mod push;
pub mod sets;
pub mod stats;
pub mod templates;
pub mod timer;

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_auth, require_page_session};
use crate::services::PathCache;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Successful action result: `{"success": true, "data": ...}`.
///
/// Failures are rendered by [`AppError`].
#[derive(Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(data: T) -> Json<ActionResponse<T>> {
    Json(ActionResponse {
        success: true,
        data: Some(data),
    })
}

/// Success without a payload (deletes, unsubscribes).
pub fn done() -> Json<ActionResponse<()>> {
    Json(ActionResponse {
        success: true,
        data: None,
    })
}

/// Serve an action result from the path cache, loading and caching it on a
/// miss. A load that overlaps a revalidation is served but not cached.
pub async fn cached<T, F, Fut>(cache: &PathCache, key: String, load: F) -> Result<Json<Value>>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(key = %key, "Cache hit");
        return Ok(Json(hit));
    }

    let generation = cache.generation();
    let Json(response) = ok(load().await?);
    let value = serde_json::to_value(response)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize response: {}", e)))?;
    cache.insert(key, value.clone(), generation);
    Ok(Json(value))
}

/// JSON request body whose parse failures are reported as tagged errors.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes());

    // JSON actions: 401 without a session
    let api_routes = Router::new()
        .merge(auth::session_routes())
        .merge(exercises::routes())
        .merge(sets::routes())
        .merge(preferences::routes())
        .merge(templates::routes())
        .merge(profile::routes())
        .merge(stats::routes())
        .merge(timer::routes())
        .merge(push::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Pages: redirect to login without a session
    let page_routes = pages::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_page_session,
    ));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(page_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_cached_serves_and_stores_on_miss() {
        let cache = PathCache::new();

        let Json(first) = cached(&cache, "/exercises".to_string(), || async { Ok(vec![1, 2]) })
            .await
            .unwrap();
        assert_eq!(first, json!({ "success": true, "data": [1, 2] }));

        // Hit: the new loader's result is not used
        let Json(second) = cached(&cache, "/exercises".to_string(), || async { Ok(vec![9]) })
            .await
            .unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_cached_skips_value_loaded_across_a_revalidation() {
        let cache = PathCache::new();

        let Json(served) = cached(&cache, "/exercises".to_string(), || async {
            // A mutation lands while the listing is being read
            cache.revalidate("/exercises");
            Ok(vec!["Bench Press"])
        })
        .await
        .unwrap();

        assert_eq!(served["data"], json!(["Bench Press"]));
        assert!(cache.get("/exercises").is_none());
        assert!(cache.is_empty());
    }
}
