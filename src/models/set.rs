// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged set model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

use crate::models::exercise::non_blank;
use crate::models::Exercise;

/// How hard a set felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SetIntensity {
    #[serde(rename = "Warm Up")]
    #[sqlx(rename = "Warm Up")]
    WarmUp,
    Low,
    Moderate,
    High,
    Failure,
}

/// A single logged performance of an exercise.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Set {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// Exercise ID
    pub exercise: i64,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub intensity: Option<SetIntensity>,
    pub notes: Option<String>,
    pub user_id: Uuid,
}

/// Set with its exercise attached.
#[derive(Debug, Clone, Serialize)]
pub struct SetWithExercise {
    #[serde(flatten)]
    pub set: Set,
    pub exercise_data: Exercise,
}

/// Input for logging a set. The owner comes from the session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSetInput {
    pub exercise: i64,
    #[validate(range(min = 1, message = "Reps must be a positive integer"))]
    pub reps: Option<i64>,
    #[validate(range(exclusive_min = 0.0, message = "Weight must be a positive number"))]
    pub weight: Option<f64>,
    pub intensity: Option<SetIntensity>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreateSetInput {
    pub fn normalize(mut self) -> Self {
        self.notes = non_blank(self.notes);
        self
    }
}

/// Partial update of a set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSetInput {
    pub exercise: Option<i64>,
    #[validate(range(min = 1, message = "Reps must be a positive integer"))]
    pub reps: Option<i64>,
    #[validate(range(exclusive_min = 0.0, message = "Weight must be a positive number"))]
    pub weight: Option<f64>,
    pub intensity: Option<SetIntensity>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Position in the newest-first set listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

/// Filters for listing sets. All given filters must match.
#[derive(Debug, Clone, Default)]
pub struct SetFilter {
    pub user_id: Option<Uuid>,
    pub exercise_id: Option<i64>,
    /// Only sets strictly older than this position
    pub before: Option<SetCursor>,
    pub limit: Option<u32>,
}
