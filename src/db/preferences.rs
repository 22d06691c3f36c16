// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-exercise user preferences.

use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    CreatePreferenceInput, PreferenceWithExercise, UpdatePreferenceInput, UserPreference,
};

impl Database {
    pub async fn create_preference(
        &self,
        user_id: Uuid,
        input: &CreatePreferenceInput,
    ) -> Result<UserPreference, AppError> {
        sqlx::query_as::<_, UserPreference>(
            r#"
            INSERT INTO user_preferences (created_at, user_id, exercise_id, preference_level, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .bind(input.exercise_id)
        .bind(input.preference_level)
        .bind(&input.notes)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("create preference", e))
    }

    /// All of a user's preferences with their exercises, oldest first.
    pub async fn list_preferences(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PreferenceWithExercise>, AppError> {
        let preferences = sqlx::query_as::<_, UserPreference>(
            "SELECT * FROM user_preferences WHERE user_id = ?1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch preferences", e))?;

        let exercises = self
            .exercises_by_id(preferences.iter().map(|p| p.exercise_id))
            .await?;

        Ok(preferences
            .into_iter()
            .filter_map(|preference| {
                let exercise = exercises.get(&preference.exercise_id)?.clone();
                Some(PreferenceWithExercise {
                    preference,
                    exercise,
                })
            })
            .collect())
    }

    pub async fn update_preference(
        &self,
        id: i64,
        owner: Uuid,
        input: &UpdatePreferenceInput,
    ) -> Result<Option<UserPreference>, AppError> {
        sqlx::query_as::<_, UserPreference>(
            r#"
            UPDATE user_preferences SET
                exercise_id = COALESCE(?3, exercise_id),
                preference_level = COALESCE(?4, preference_level),
                notes = COALESCE(?5, notes)
            WHERE id = ?1 AND user_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.exercise_id)
        .bind(input.preference_level)
        .bind(&input.notes)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("update preference", e))
    }

    pub async fn delete_preference(&self, id: i64, owner: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_preferences WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("delete preference", e))?;
        Ok(result.rows_affected() > 0)
    }
}
