// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page view-models under `/protected`.
//!
//! Each page returns the data it renders. The session layer in
//! `routes/mod.rs` redirects unauthenticated requests to the login page.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    BodyRegion, Exercise, ExerciseDetail, MoveDirection, PlannedExerciseEdit, PreferenceForm,
    SetFilter, SetWithExercise, TemplateWithExercises, TrainingDay, UserProfile, WorkoutPreferences,
    WorkoutStats,
};
use crate::routes::Payload;
use crate::services::generation::{
    self, GenerationOptions, GenerationStep, PlanReview, FORM_PATH, RESULT_PATH, SESSION_PATH,
};
use crate::time_utils::{current_month, month_bounds};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

const WORKOUTS_PAGE: &str = "/protected/dashboard/workouts";
const RECENT_SETS: u32 = 5;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/protected/dashboard", get(dashboard))
        .route(WORKOUTS_PAGE, get(workouts))
        .route("/protected/dashboard/workouts/quick-start", get(quick_start))
        .route("/protected/dashboard/workouts/exercise/{id}", get(exercise))
        .route(FORM_PATH, get(generate_form).post(submit_generate_form))
        .route(RESULT_PATH, get(generate_result))
        .route(
            "/protected/dashboard/workouts/generate/result/exercises/{exercise_id}",
            put(edit_planned_exercise).delete(remove_planned_exercise),
        )
        .route(
            "/protected/dashboard/workouts/generate/result/exercises/{exercise_id}/move",
            post(move_planned_exercise),
        )
        .route(
            "/protected/dashboard/workouts/generate/result/start",
            post(start_workout),
        )
        .route("/protected/dashboard/profile", get(profile))
        .route("/protected/dashboard/calendar", get(calendar))
        .route("/protected/settings", get(settings))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardPage {
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
    pub stats: WorkoutStats,
    pub recent_sets: Vec<SetWithExercise>,
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardPage>> {
    let profile = state.db.get_profile(user.user_id).await?;
    let stats = state.db.workout_stats(user.user_id, None).await?;
    let recent_sets = state
        .db
        .list_sets_with_exercise(&SetFilter {
            user_id: Some(user.user_id),
            limit: Some(RECENT_SETS),
            ..Default::default()
        })
        .await?;

    Ok(Json(DashboardPage {
        user,
        profile,
        stats,
        recent_sets,
    }))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct WorkoutsPage {
    pub exercises: Vec<Exercise>,
    pub templates: Vec<TemplateWithExercises>,
}

async fn workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WorkoutsPage>> {
    let exercises = state.db.list_exercises(None, None).await?;
    let templates = state.db.list_templates(user.user_id).await?;
    Ok(Json(WorkoutsPage {
        exercises,
        templates,
    }))
}

#[derive(Debug, Serialize)]
pub struct BodypartGroup {
    pub bodypart: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize)]
pub struct RegionGroup {
    pub body_region: BodyRegion,
    pub bodyparts: Vec<BodypartGroup>,
}

#[derive(Serialize)]
pub struct QuickStartPage {
    pub regions: Vec<RegionGroup>,
}

/// Group exercises by body region, then by primary bodypart (case-insensitive,
/// alphabetical). Regions without exercises are left out.
pub fn group_exercises(exercises: Vec<Exercise>) -> Vec<RegionGroup> {
    let mut regions = Vec::new();
    for region in [BodyRegion::Upper, BodyRegion::Lower, BodyRegion::Full] {
        let mut by_bodypart: BTreeMap<String, BodypartGroup> = BTreeMap::new();
        for exercise in exercises.iter().filter(|e| e.body_region == region) {
            by_bodypart
                .entry(exercise.primary_bodypart.to_lowercase())
                .or_insert_with(|| BodypartGroup {
                    bodypart: exercise.primary_bodypart.clone(),
                    exercises: Vec::new(),
                })
                .exercises
                .push(exercise.clone());
        }
        if !by_bodypart.is_empty() {
            regions.push(RegionGroup {
                body_region: region,
                bodyparts: by_bodypart.into_values().collect(),
            });
        }
    }
    regions
}

async fn quick_start(State(state): State<Arc<AppState>>) -> Result<Json<QuickStartPage>> {
    let exercises = state.db.list_exercises(None, None).await?;
    Ok(Json(QuickStartPage {
        regions: group_exercises(exercises),
    }))
}

/// Exercise with the caller's history; unknown exercises go back to the
/// workouts listing.
async fn exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response> {
    let Ok(id) = id.parse::<i64>() else {
        return Ok(Redirect::to(WORKOUTS_PAGE).into_response());
    };
    let detail: Option<ExerciseDetail> = state.db.get_exercise_detail(id, user.user_id).await?;
    match detail {
        Some(detail) => Ok(Json(detail).into_response()),
        None => {
            tracing::debug!(exercise_id = id, "Unknown exercise page requested");
            Ok(Redirect::to(WORKOUTS_PAGE).into_response())
        }
    }
}

// ─── Workout generation ──────────────────────────────────────

#[derive(Serialize)]
pub struct GenerateFormPage {
    pub step: GenerationStep,
    pub options: GenerationOptions,
    pub saved_preferences: Option<WorkoutPreferences>,
}

async fn generate_form(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<GenerateFormPage> {
    Json(GenerateFormPage {
        step: state.generation.step(user.user_id),
        options: generation::options(),
        saved_preferences: state.generation.preferences(user.user_id),
    })
}

/// Submit the preference form; a complete form continues to the result page.
async fn submit_generate_form(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Payload(form): Payload<PreferenceForm>,
) -> Result<Redirect> {
    state.generation.submit(user.user_id, form)?;
    Ok(Redirect::to(RESULT_PATH))
}

/// The plan under review; without a submitted form, back to the form.
async fn generate_result(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match state.generation.review(user.user_id) {
        Some(review) => Json(review).into_response(),
        None => Redirect::to(FORM_PATH).into_response(),
    }
}

async fn edit_planned_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exercise_id): Path<String>,
    Payload(edit): Payload<PlannedExerciseEdit>,
) -> Result<Json<PlanReview>> {
    edit.validate()?;
    Ok(Json(state.generation.update_exercise(
        user.user_id,
        &exercise_id,
        edit,
    )?))
}

async fn remove_planned_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exercise_id): Path<String>,
) -> Result<Json<PlanReview>> {
    Ok(Json(
        state.generation.remove_exercise(user.user_id, &exercise_id)?,
    ))
}

#[derive(Deserialize)]
struct MoveRequest {
    direction: MoveDirection,
}

async fn move_planned_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exercise_id): Path<String>,
    Payload(body): Payload<MoveRequest>,
) -> Result<Json<PlanReview>> {
    Ok(Json(state.generation.move_exercise(
        user.user_id,
        &exercise_id,
        body.direction,
    )?))
}

/// Begin the reviewed workout and continue to the session page.
async fn start_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Redirect> {
    state.generation.start(user.user_id)?;
    Ok(Redirect::to(SESSION_PATH))
}

// ─── Profile, calendar, settings ─────────────────────────────

#[derive(Serialize)]
pub struct ProfilePage {
    pub user: AuthUser,
    pub profile: Option<UserProfile>,
}

async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfilePage>> {
    let profile = state.db.get_profile(user.user_id).await?;
    Ok(Json(ProfilePage { user, profile }))
}

#[derive(Deserialize)]
struct CalendarQuery {
    /// `YYYY-MM`; defaults to the current month
    month: Option<String>,
}

#[derive(Serialize)]
pub struct CalendarPage {
    pub year: i32,
    pub month: u32,
    pub training_days: Vec<TrainingDay>,
}

fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

async fn calendar(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarPage>> {
    let (year, month) = match params.month.as_deref() {
        Some(raw) => parse_month(raw)
            .ok_or_else(|| AppError::field("month", "Month must look like YYYY-MM"))?,
        None => current_month(Utc::now()),
    };
    let (from, to) = month_bounds(year, month)
        .ok_or_else(|| AppError::field("month", "Month is out of range"))?;

    let training_days = state.db.training_days(user.user_id, from, to).await?;
    Ok(Json(CalendarPage {
        year,
        month,
        training_days,
    }))
}

#[derive(Serialize)]
pub struct SettingsPage {
    pub user: AuthUser,
    pub push_subscribed: bool,
    pub vapid_public_key: Option<String>,
}

async fn settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<SettingsPage> {
    Json(SettingsPage {
        user,
        push_subscribed: state.push.is_subscribed().await,
        vapid_public_key: state.push.vapid_public_key().map(str::to_string),
    })
}
