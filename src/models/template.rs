// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout templates and their exercise presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Exercise;

/// Named collection of exercises owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutTemplate {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub user_id: Uuid,
}

/// Join record placing an exercise in a template.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExercisePreset {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub template_id: i64,
    pub exercise_id: i64,
    /// Order inside the template, starting at 0
    pub position: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetWithExercise {
    #[serde(flatten)]
    pub preset: ExercisePreset,
    pub exercise: Exercise,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithExercises {
    #[serde(flatten)]
    pub template: WorkoutTemplate,
    pub exercise_presets: Vec<PresetWithExercise>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateInput {
    #[validate(length(min = 1, max = 100, message = "Template name is required"))]
    pub name: String,
    /// Exercises in template order
    #[serde(default)]
    #[validate(length(max = 50))]
    pub exercise_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTemplateInput {
    #[validate(length(min = 1, max = 100, message = "Template name is required"))]
    pub name: Option<String>,
    /// Replaces the template's presets when present
    #[validate(length(max = 50))]
    pub exercise_ids: Option<Vec<i64>>,
}
