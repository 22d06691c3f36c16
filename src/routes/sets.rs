// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set logging actions.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CreateSetInput, SetCursor, SetFilter, SetWithExercise, UpdateSetInput};
use crate::routes::{cached, done, ok, ActionResponse, Payload};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub const WORKOUTS_PATH: &str = "/workouts";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sets", get(list_sets).post(create_set))
        .route("/api/sets/{id}", put(update_set).delete(delete_set))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Set {} not found", id))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct SetsQuery {
    /// Only sets of this exercise
    exercise: Option<i64>,
    /// Opaque token from a previous page's `next_cursor`
    cursor: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    50
}

const MAX_LIMIT: u32 = 200;
const CURSOR_PARTS: usize = 3;

fn parse_cursor(cursor: Option<&str>) -> Result<Option<SetCursor>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let decoded_str = std::str::from_utf8(&decoded).map_err(|_| invalid_cursor())?;

            let parts: Vec<&str> = decoded_str.split(':').collect();
            if parts.len() != CURSOR_PARTS {
                return Err(invalid_cursor());
            }

            let seconds = parts[0].parse::<i64>().map_err(|_| invalid_cursor())?;
            let nanos = parts[1].parse::<u32>().map_err(|_| invalid_cursor())?;
            let id = parts[2].parse::<i64>().map_err(|_| invalid_cursor())?;
            let created_at =
                chrono::DateTime::from_timestamp(seconds, nanos).ok_or_else(invalid_cursor)?;

            Ok(SetCursor { created_at, id })
        })
        .transpose()
}

fn encode_cursor(cursor: SetCursor) -> String {
    let payload = format!(
        "{}:{}:{}",
        cursor.created_at.timestamp(),
        cursor.created_at.timestamp_subsec_nanos(),
        cursor.id
    );
    URL_SAFE_NO_PAD.encode(payload)
}

#[derive(Serialize)]
pub struct SetsPage {
    pub sets: Vec<SetWithExercise>,
    pub next_cursor: Option<String>,
}

/// The caller's sets, newest first.
async fn list_sets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SetsQuery>,
) -> Result<Json<Value>> {
    let limit = params.limit.clamp(1, MAX_LIMIT);
    let before = parse_cursor(params.cursor.as_deref())?;

    let key = format!(
        "{}/sets?user={}&exercise={:?}&cursor={}&limit={}",
        WORKOUTS_PATH,
        user.user_id,
        params.exercise,
        params.cursor.as_deref().unwrap_or(""),
        limit
    );

    cached(&state.cache, key, || async {
        // Fetch one extra row to learn whether another page exists.
        let mut sets = state
            .db
            .list_sets_with_exercise(&SetFilter {
                user_id: Some(user.user_id),
                exercise_id: params.exercise,
                before,
                limit: Some(limit + 1),
            })
            .await?;

        let has_more = sets.len() > limit as usize;
        sets.truncate(limit as usize);
        let next_cursor = if has_more {
            sets.last().map(|s| {
                encode_cursor(SetCursor {
                    created_at: s.set.created_at,
                    id: s.set.id,
                })
            })
        } else {
            None
        };

        Ok(SetsPage { sets, next_cursor })
    })
    .await
}

// ─── Mutations ───────────────────────────────────────────────

async fn create_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(input): Payload<CreateSetInput>,
) -> Result<Json<ActionResponse<SetWithExercise>>> {
    let input = input.normalize();
    input.validate()?;

    let set = state.db.create_set(user.user_id, &input).await?;
    tracing::info!(
        user_id = %user.user_id,
        set_id = set.set.id,
        exercise = set.set.exercise,
        "Set logged"
    );

    state.cache.revalidate(WORKOUTS_PATH);
    Ok(ok(set))
}

async fn update_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Payload(input): Payload<UpdateSetInput>,
) -> Result<Json<ActionResponse<SetWithExercise>>> {
    input.validate()?;

    let set = state
        .db
        .update_set(id, user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.cache.revalidate(WORKOUTS_PATH);
    Ok(ok(set))
}

async fn delete_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ActionResponse<()>>> {
    if !state.db.delete_set(id, user.user_id).await? {
        return Err(not_found(id));
    }

    state.cache.revalidate(WORKOUTS_PATH);
    Ok(done())
}
