// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-exercise preference actions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CreatePreferenceInput, UpdatePreferenceInput, UserPreference};
use crate::routes::{cached, done, ok, ActionResponse, Payload};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub const PREFERENCES_PATH: &str = "/preferences";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/preferences",
            get(list_preferences).post(create_preference),
        )
        .route(
            "/api/preferences/{id}",
            put(update_preference).delete(delete_preference),
        )
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Preference {} not found", id))
}

async fn list_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let key = format!("{}/{}", PREFERENCES_PATH, user.user_id);
    cached(&state.cache, key, || state.db.list_preferences(user.user_id)).await
}

async fn create_preference(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(input): Payload<CreatePreferenceInput>,
) -> Result<Json<ActionResponse<UserPreference>>> {
    let input = input.normalize();
    input.validate()?;

    let preference = state.db.create_preference(user.user_id, &input).await?;
    state.cache.revalidate(PREFERENCES_PATH);
    Ok(ok(preference))
}

async fn update_preference(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Payload(input): Payload<UpdatePreferenceInput>,
) -> Result<Json<ActionResponse<UserPreference>>> {
    input.validate()?;

    let preference = state
        .db
        .update_preference(id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.cache.revalidate(PREFERENCES_PATH);
    Ok(ok(preference))
}

async fn delete_preference(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<()>>> {
    if !state.db.delete_preference(id, user.user_id).await? {
        return Err(not_found(id));
    }
    state.cache.revalidate(PREFERENCES_PATH);
    Ok(done())
}
