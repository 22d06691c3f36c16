// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ExercisePreset, Set, UserPreference};

/// Coarse classification of the area an exercise targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BodyRegion {
    Upper,
    Lower,
    Full,
}

/// Difficulty level of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExerciseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Stored exercise record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub body_region: BodyRegion,
    /// Chest, Back, Quads, ...
    pub primary_bodypart: String,
    pub secondary_bodypart: Option<String>,
    /// Push, Pull, Legs, Core, ...
    pub category: Option<String>,
    pub level: Option<ExerciseLevel>,
    /// Owner for user-created exercises; `None` for the default catalog
    pub created_by: Option<Uuid>,
    pub is_default: bool,
}

/// Exercise together with everything that references it.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseDetail {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub sets: Vec<Set>,
    pub user_preferences: Vec<UserPreference>,
    pub exercise_presets: Vec<ExercisePreset>,
}

/// Input for creating an exercise.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExerciseInput {
    #[validate(length(min = 1, max = 100, message = "Exercise name is required"))]
    pub name: String,
    pub body_region: BodyRegion,
    #[validate(length(min = 1, max = 50, message = "Primary bodypart is required"))]
    pub primary_bodypart: String,
    #[validate(length(max = 50))]
    pub secondary_bodypart: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub level: Option<ExerciseLevel>,
}

impl CreateExerciseInput {
    /// Trim text fields; blank optional fields count as absent.
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.primary_bodypart = self.primary_bodypart.trim().to_string();
        self.secondary_bodypart = non_blank(self.secondary_bodypart);
        self.category = non_blank(self.category);
        self
    }
}

/// Partial update of an exercise. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExerciseInput {
    #[validate(length(min = 1, max = 100, message = "Exercise name is required"))]
    pub name: Option<String>,
    pub body_region: Option<BodyRegion>,
    #[validate(length(min = 1, max = 50, message = "Primary bodypart is required"))]
    pub primary_bodypart: Option<String>,
    #[validate(length(max = 50))]
    pub secondary_bodypart: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub level: Option<ExerciseLevel>,
}

impl UpdateExerciseInput {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.map(|s| s.trim().to_string());
        self.primary_bodypart = self.primary_bodypart.map(|s| s.trim().to_string());
        self.secondary_bodypart = non_blank(self.secondary_bodypart);
        self.category = non_blank(self.category);
        self
    }
}

/// Filters for the exercise search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseSearch {
    /// Substring matched against name and both bodypart fields
    #[serde(default)]
    pub q: String,
    /// Exact (case-insensitive) primary bodypart
    pub bodypart: Option<String>,
    /// Exact (case-insensitive) category
    pub category: Option<String>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
