// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout template actions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CreateTemplateInput, TemplateWithExercises, UpdateTemplateInput};
use crate::routes::{cached, done, ok, ActionResponse, Payload};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub const TEMPLATES_PATH: &str = "/templates";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/templates", get(list_templates).post(create_template))
        .route(
            "/api/templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Template {} not found", id))
}

async fn list_templates(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>> {
    let key = format!("{}/{}", TEMPLATES_PATH, user.user_id);
    cached(&state.cache, key, || state.db.list_templates(user.user_id)).await
}

async fn get_template(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<TemplateWithExercises>>> {
    let template = state
        .db
        .get_template(id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ok(template))
}

async fn create_template(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(mut input): Payload<CreateTemplateInput>,
) -> Result<Json<ActionResponse<TemplateWithExercises>>> {
    input.name = input.name.trim().to_string();
    input.validate()?;

    let template = state.db.create_template(user.user_id, &input).await?;
    tracing::info!(
        template_id = template.template.id,
        exercises = template.exercise_presets.len(),
        "Workout template created"
    );

    state.cache.revalidate(TEMPLATES_PATH);
    Ok(ok(template))
}

async fn update_template(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Payload(mut input): Payload<UpdateTemplateInput>,
) -> Result<Json<ActionResponse<TemplateWithExercises>>> {
    input.name = input.name.map(|n| n.trim().to_string());
    input.validate()?;

    let template = state
        .db
        .update_template(id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.cache.revalidate(TEMPLATES_PATH);
    Ok(ok(template))
}

async fn delete_template(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<()>>> {
    if !state.db.delete_template(id, user.user_id).await? {
        return Err(not_found(id));
    }
    state.cache.revalidate(TEMPLATES_PATH);
    Ok(done())
}
