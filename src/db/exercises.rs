// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise operations.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::db::sqlite::Conditions;
use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    CreateExerciseInput, Exercise, ExerciseDetail, ExercisePreset, ExerciseSearch, Set,
    UpdateExerciseInput, UserPreference,
};

impl Database {
    /// Create a user-owned exercise.
    pub async fn create_exercise(
        &self,
        created_by: Option<Uuid>,
        input: &CreateExerciseInput,
    ) -> Result<Exercise, AppError> {
        sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (
                created_at, name, body_region, primary_bodypart,
                secondary_bodypart, category, level, created_by, is_default
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0)
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(&input.name)
        .bind(input.body_region)
        .bind(&input.primary_bodypart)
        .bind(&input.secondary_bodypart)
        .bind(&input.category)
        .bind(input.level)
        .bind(created_by)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("create exercise", e))
    }

    /// List exercises ordered by name, optionally only those created by a user.
    pub async fn list_exercises(
        &self,
        limit: Option<u32>,
        created_by: Option<Uuid>,
    ) -> Result<Vec<Exercise>, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM exercises");
        if let Some(owner) = created_by {
            query.push(" WHERE created_by = ").push_bind(owner);
        }
        query.push(" ORDER BY name COLLATE NOCASE, id");
        if let Some(limit) = limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        query
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("fetch exercises", e))
    }

    /// Get an exercise by ID.
    pub async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, AppError> {
        sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("fetch exercise", e))
    }

    /// Get an exercise with the viewer's sets, preferences and template presets.
    pub async fn get_exercise_detail(
        &self,
        id: i64,
        viewer: Uuid,
    ) -> Result<Option<ExerciseDetail>, AppError> {
        let Some(exercise) = self.get_exercise(id).await? else {
            return Ok(None);
        };

        let sets = sqlx::query_as::<_, Set>(
            r#"
            SELECT * FROM sets
            WHERE exercise = ?1 AND user_id = ?2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(id)
        .bind(viewer)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch exercise sets", e))?;

        let user_preferences = sqlx::query_as::<_, UserPreference>(
            "SELECT * FROM user_preferences WHERE exercise_id = ?1 AND user_id = ?2 ORDER BY id",
        )
        .bind(id)
        .bind(viewer)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch exercise preferences", e))?;

        let exercise_presets = sqlx::query_as::<_, ExercisePreset>(
            r#"
            SELECT p.* FROM exercise_presets p
            JOIN workout_templates t ON t.id = p.template_id
            WHERE p.exercise_id = ?1 AND t.user_id = ?2
            ORDER BY p.template_id, p.position
            "#,
        )
        .bind(id)
        .bind(viewer)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch exercise presets", e))?;

        Ok(Some(ExerciseDetail {
            exercise,
            sets,
            user_preferences,
            exercise_presets,
        }))
    }

    /// Apply a partial update. Returns `None` if the exercise does not exist.
    pub async fn update_exercise(
        &self,
        id: i64,
        input: &UpdateExerciseInput,
    ) -> Result<Option<Exercise>, AppError> {
        sqlx::query_as::<_, Exercise>(
            r#"
            UPDATE exercises SET
                name = COALESCE(?2, name),
                body_region = COALESCE(?3, body_region),
                primary_bodypart = COALESCE(?4, primary_bodypart),
                secondary_bodypart = COALESCE(?5, secondary_bodypart),
                category = COALESCE(?6, category),
                level = COALESCE(?7, level)
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.body_region)
        .bind(&input.primary_bodypart)
        .bind(&input.secondary_bodypart)
        .bind(&input.category)
        .bind(input.level)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("update exercise", e))
    }

    /// Delete an exercise. Returns `false` if it did not exist.
    ///
    /// Exercises still referenced by sets, preferences or presets are not
    /// deleted (conflict).
    pub async fn delete_exercise(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("delete exercise", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive search across name and bodypart fields.
    ///
    /// `q` matches as a substring of the name, primary or secondary bodypart;
    /// `bodypart` and `category` must match exactly (ignoring case) when set.
    pub async fn search_exercises(
        &self,
        search: &ExerciseSearch,
    ) -> Result<Vec<Exercise>, AppError> {
        let needle = search.q.trim().to_lowercase();

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM exercises");
        let mut conditions = Conditions::new();

        conditions.next(&mut query);
        query
            .push("(instr(lower(name), ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(lower(primary_bodypart), ")
            .push_bind(needle.clone())
            .push(") > 0 OR instr(lower(COALESCE(secondary_bodypart, '')), ")
            .push_bind(needle)
            .push(") > 0)");

        if let Some(bodypart) = search.bodypart.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            conditions.next(&mut query);
            query
                .push("lower(primary_bodypart) = ")
                .push_bind(bodypart.to_lowercase());
        }
        if let Some(category) = search.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            conditions.next(&mut query);
            query
                .push("lower(category) = ")
                .push_bind(category.to_lowercase());
        }
        query.push(" ORDER BY name COLLATE NOCASE, id");

        query
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("search exercises", e))
    }
}
