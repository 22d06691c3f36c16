// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout templates and their ordered exercise presets.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    CreateTemplateInput, ExercisePreset, PresetWithExercise, TemplateWithExercises,
    UpdateTemplateInput, WorkoutTemplate,
};

impl Database {
    /// Create a template and its presets atomically.
    pub async fn create_template(
        &self,
        user_id: Uuid,
        input: &CreateTemplateInput,
    ) -> Result<TemplateWithExercises, AppError> {
        let now = Utc::now();
        let mut tx = self.begin("create template").await?;

        let template = sqlx::query_as::<_, WorkoutTemplate>(
            "INSERT INTO workout_templates (created_at, name, user_id) VALUES (?1, ?2, ?3) RETURNING *",
        )
        .bind(now)
        .bind(&input.name)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx("create template", e))?;

        insert_presets(&mut tx, template.id, &input.exercise_ids, now).await?;
        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx("create template", e))?;

        self.with_presets(template).await
    }

    /// A user's templates with their presets, newest first.
    pub async fn list_templates(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TemplateWithExercises>, AppError> {
        let templates = sqlx::query_as::<_, WorkoutTemplate>(
            "SELECT * FROM workout_templates WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch templates", e))?;

        let mut result = Vec::with_capacity(templates.len());
        for template in templates {
            result.push(self.with_presets(template).await?);
        }
        Ok(result)
    }

    pub async fn get_template(
        &self,
        id: i64,
        owner: Uuid,
    ) -> Result<Option<TemplateWithExercises>, AppError> {
        let template = sqlx::query_as::<_, WorkoutTemplate>(
            "SELECT * FROM workout_templates WHERE id = ?1 AND user_id = ?2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch template", e))?;

        match template {
            Some(template) => Ok(Some(self.with_presets(template).await?)),
            None => Ok(None),
        }
    }

    /// Rename a template and/or replace its presets.
    pub async fn update_template(
        &self,
        id: i64,
        owner: Uuid,
        input: &UpdateTemplateInput,
    ) -> Result<Option<TemplateWithExercises>, AppError> {
        let mut tx = self.begin("update template").await?;

        let template = sqlx::query_as::<_, WorkoutTemplate>(
            r#"
            UPDATE workout_templates SET name = COALESCE(?3, name)
            WHERE id = ?1 AND user_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&input.name)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_sqlx("update template", e))?;

        let Some(template) = template else {
            return Ok(None);
        };

        if let Some(exercise_ids) = &input.exercise_ids {
            sqlx::query("DELETE FROM exercise_presets WHERE template_id = ?1")
                .bind(template.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_sqlx("update template", e))?;
            insert_presets(&mut tx, template.id, exercise_ids, Utc::now()).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx("update template", e))?;

        Ok(Some(self.with_presets(template).await?))
    }

    /// Delete a template; its presets go with it.
    pub async fn delete_template(&self, id: i64, owner: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM workout_templates WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("delete template", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self, action: &str) -> Result<Transaction<'static, Sqlite>, AppError> {
        self.pool()
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx(action, e))
    }

    async fn with_presets(
        &self,
        template: WorkoutTemplate,
    ) -> Result<TemplateWithExercises, AppError> {
        let presets = sqlx::query_as::<_, ExercisePreset>(
            "SELECT * FROM exercise_presets WHERE template_id = ?1 ORDER BY position, id",
        )
        .bind(template.id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch template presets", e))?;

        let exercises = self
            .exercises_by_id(presets.iter().map(|p| p.exercise_id))
            .await?;

        let exercise_presets = presets
            .into_iter()
            .filter_map(|preset| {
                let exercise = exercises.get(&preset.exercise_id)?.clone();
                Some(PresetWithExercise { preset, exercise })
            })
            .collect();

        Ok(TemplateWithExercises {
            template,
            exercise_presets,
        })
    }
}

async fn insert_presets(
    tx: &mut Transaction<'static, Sqlite>,
    template_id: i64,
    exercise_ids: &[i64],
    created_at: DateTime<Utc>,
) -> Result<(), AppError> {
    for (position, exercise_id) in exercise_ids.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO exercise_presets (created_at, template_id, exercise_id, position)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(created_at)
        .bind(template_id)
        .bind(exercise_id)
        .bind(position as i64)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_sqlx("add exercise to template", e))?;
    }
    Ok(())
}
