// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile actions.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ProfileInput, UserProfile};
use crate::routes::{cached, ok, ActionResponse, Payload};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub const PROFILE_PATH: &str = "/profile";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).put(save_profile))
}

/// The caller's profile; `data` is `null` before the first save.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let key = format!("{}/{}", PROFILE_PATH, user.user_id);
    cached(&state.cache, key, || state.db.get_profile(user.user_id)).await
}

async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(input): Payload<ProfileInput>,
) -> Result<Json<ActionResponse<UserProfile>>> {
    let input = input.normalize();
    input.validate()?;

    let profile = state.db.upsert_profile(user.user_id, &input).await?;
    tracing::info!(user_id = %user.user_id, "Profile saved");

    state.cache.revalidate(PROFILE_PATH);
    Ok(ok(profile))
}
