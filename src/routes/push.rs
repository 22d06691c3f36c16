// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push notification actions (single shared subscription).

use crate::error::{AppError, Result};
use crate::routes::{done, ok, ActionResponse, Payload};
use crate::services::PushSubscription;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/push/vapid-public-key", get(vapid_public_key))
        .route("/api/push/subscribe", post(subscribe))
        .route("/api/push/unsubscribe", post(unsubscribe))
        .route("/api/push/send", post(send))
}

#[derive(Serialize)]
struct VapidKey {
    public_key: String,
}

async fn vapid_public_key(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse<VapidKey>>> {
    let public_key = state
        .push
        .vapid_public_key()
        .ok_or_else(|| AppError::NotFound("Push notifications are not configured".to_string()))?;
    Ok(ok(VapidKey {
        public_key: public_key.to_string(),
    }))
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    Payload(subscription): Payload<PushSubscription>,
) -> Result<Json<ActionResponse<()>>> {
    state.push.subscribe(subscription).await?;
    Ok(done())
}

async fn unsubscribe(State(state): State<Arc<AppState>>) -> Json<ActionResponse<()>> {
    state.push.unsubscribe().await;
    done()
}

#[derive(Deserialize, Validate)]
struct SendNotification {
    #[validate(length(min = 1, max = 1000, message = "Message is required"))]
    message: String,
}

async fn send(
    State(state): State<Arc<AppState>>,
    Payload(body): Payload<SendNotification>,
) -> Result<Json<ActionResponse<()>>> {
    body.validate()?;
    state.push.send(&body.message).await?;
    Ok(done())
}
