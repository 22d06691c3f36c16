// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Default exercise catalog.

use chrono::Utc;
use serde::Deserialize;

use crate::db::Database;
use crate::error::AppError;
use crate::models::{BodyRegion, ExerciseLevel};

const DEFAULT_EXERCISES_JSON: &str = include_str!("../../data/default_exercises.json");

#[derive(Debug, Deserialize)]
pub struct DefaultExercise {
    pub name: String,
    pub body_region: BodyRegion,
    pub primary_bodypart: String,
    pub secondary_bodypart: Option<String>,
    pub category: Option<String>,
    pub level: Option<ExerciseLevel>,
}

/// Parse the bundled catalog.
pub fn default_exercises() -> Result<Vec<DefaultExercise>, AppError> {
    serde_json::from_str(DEFAULT_EXERCISES_JSON)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid default exercise data: {}", e)))
}

impl Database {
    /// Insert every default exercise not already present.
    ///
    /// Returns the number of rows inserted; running it again inserts none.
    pub async fn seed_default_exercises(&self) -> Result<u64, AppError> {
        let exercises = default_exercises()?;
        let now = Utc::now();
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::from_sqlx("seed exercises", e))?;

        let mut inserted = 0;
        for exercise in &exercises {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO exercises (
                    created_at, name, body_region, primary_bodypart,
                    secondary_bodypart, category, level, created_by, is_default
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, 1)
                "#,
            )
            .bind(now)
            .bind(&exercise.name)
            .bind(exercise.body_region)
            .bind(&exercise.primary_bodypart)
            .bind(&exercise.secondary_bodypart)
            .bind(&exercise.category)
            .bind(exercise.level)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_sqlx("seed exercises", e))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_sqlx("seed exercises", e))?;

        tracing::info!(
            inserted,
            total = exercises.len(),
            "Seeded default exercises"
        );
        Ok(inserted)
    }
}
