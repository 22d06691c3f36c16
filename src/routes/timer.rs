// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rest timer controls.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::routes::{ok, ActionResponse};
use crate::services::timer::{TimerSnapshot, DEFAULT_REST_SECONDS};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

const MAX_REST_SECONDS: u32 = 60 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/timer", get(get_timer))
        .route("/api/timer/start", post(start_timer))
        .route("/api/timer/pause", post(pause_timer))
        .route("/api/timer/resume", post(resume_timer))
        .route("/api/timer/stop", post(stop_timer))
}

#[derive(Deserialize, Default)]
struct StartTimer {
    /// Countdown length; defaults to 90 seconds
    seconds: Option<u32>,
}

async fn get_timer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<ActionResponse<TimerSnapshot>> {
    ok(state.timers.for_user(user.user_id).snapshot().await)
}

async fn start_timer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<ActionResponse<TimerSnapshot>>> {
    // An empty body starts the default countdown.
    let body: StartTimer = if body.is_empty() {
        StartTimer::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };
    let seconds = body.seconds.unwrap_or(DEFAULT_REST_SECONDS);
    if seconds == 0 || seconds > MAX_REST_SECONDS {
        return Err(AppError::field(
            "seconds",
            format!("Rest time must be between 1 and {} seconds", MAX_REST_SECONDS),
        ));
    }

    let snapshot = state.timers.for_user(user.user_id).start(seconds).await;
    tracing::debug!(user_id = %user.user_id, seconds, "Rest timer started");
    Ok(ok(snapshot))
}

async fn pause_timer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<ActionResponse<TimerSnapshot>> {
    ok(state.timers.for_user(user.user_id).pause().await)
}

async fn resume_timer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<ActionResponse<TimerSnapshot>> {
    ok(state.timers.for_user(user.user_id).resume().await)
}

async fn stop_timer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<ActionResponse<TimerSnapshot>> {
    ok(state.timers.for_user(user.user_id).stop().await)
}
