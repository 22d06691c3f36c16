// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise actions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    CreateExerciseInput, Exercise, ExerciseDetail, ExerciseSearch, UpdateExerciseInput,
};
use crate::routes::preferences::PREFERENCES_PATH;
use crate::routes::sets::WORKOUTS_PATH;
use crate::routes::templates::TEMPLATES_PATH;
use crate::routes::{cached, done, ok, ActionResponse, Payload};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub const EXERCISES_PATH: &str = "/exercises";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercises", get(list_exercises).post(create_exercise))
        .route("/api/exercises/search", get(search_exercises))
        .route(
            "/api/exercises/{id}",
            get(get_exercise)
                .put(update_exercise)
                .delete(delete_exercise),
        )
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Exercise {} not found", id))
}

#[derive(Deserialize)]
struct ListQuery {
    limit: Option<u32>,
    created_by: Option<Uuid>,
}

async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Value>> {
    let key = format!(
        "{}?limit={:?}&created_by={:?}",
        EXERCISES_PATH, params.limit, params.created_by
    );
    cached(&state.cache, key, || async {
        state.db.list_exercises(params.limit, params.created_by).await
    })
    .await
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(input): Payload<CreateExerciseInput>,
) -> Result<Json<ActionResponse<Exercise>>> {
    let input = input.normalize();
    input.validate()?;

    let exercise = state.db.create_exercise(Some(user.user_id), &input).await?;
    tracing::info!(exercise_id = exercise.id, name = %exercise.name, "Exercise created");

    state.cache.revalidate(EXERCISES_PATH);
    Ok(ok(exercise))
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<ExerciseDetail>>> {
    let detail = state
        .db
        .get_exercise_detail(id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ok(detail))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Payload(input): Payload<UpdateExerciseInput>,
) -> Result<Json<ActionResponse<Exercise>>> {
    let input = input.normalize();
    input.validate()?;

    let exercise = state
        .db
        .update_exercise(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    // Set, preference and template listings embed the exercise.
    for path in [EXERCISES_PATH, WORKOUTS_PATH, PREFERENCES_PATH, TEMPLATES_PATH] {
        state.cache.revalidate(path);
    }
    Ok(ok(exercise))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<()>>> {
    if !state.db.delete_exercise(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(exercise_id = id, "Exercise deleted");

    state.cache.revalidate(EXERCISES_PATH);
    Ok(done())
}

async fn search_exercises(
    State(state): State<Arc<AppState>>,
    Query(search): Query<ExerciseSearch>,
) -> Result<Json<ActionResponse<Vec<Exercise>>>> {
    let exercises = state.db.search_exercises(&search).await?;
    tracing::debug!(q = %search.q, results = exercises.len(), "Exercise search");
    Ok(ok(exercises))
}
