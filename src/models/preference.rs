// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-exercise user preference (1-10 affinity rating).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::exercise::non_blank;
use crate::models::Exercise;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserPreference {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub exercise_id: i64,
    pub preference_level: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceWithExercise {
    #[serde(flatten)]
    pub preference: UserPreference,
    pub exercise: Exercise,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePreferenceInput {
    pub exercise_id: i64,
    #[validate(range(min = 1, max = 10, message = "Preference level must be between 1 and 10"))]
    pub preference_level: Option<i64>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreatePreferenceInput {
    pub fn normalize(mut self) -> Self {
        self.notes = non_blank(self.notes);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePreferenceInput {
    pub exercise_id: Option<i64>,
    #[validate(range(min = 1, max = 10, message = "Preference level must be between 1 and 10"))]
    pub preference_level: Option<i64>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
