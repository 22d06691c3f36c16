// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profiles: one row per user, written with an atomic upsert.

use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::AppError;
use crate::models::{ProfileInput, UserProfile};

impl Database {
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("fetch profile", e))
    }

    /// Create or update the user's profile in a single statement.
    ///
    /// Absent fields keep their stored value. A submitted weight is also
    /// appended to the weight history.
    pub async fn upsert_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (
                user_id, name, age, gender, height, weight, fitness_level, goal, bio,
                weight_history, created_at, updated_at
            )
            VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                CASE WHEN ?6 IS NULL THEN '[]' ELSE json_array(?6) END,
                ?10, ?10
            )
            ON CONFLICT(user_id) DO UPDATE SET
                name = COALESCE(excluded.name, user_profiles.name),
                age = COALESCE(excluded.age, user_profiles.age),
                gender = COALESCE(excluded.gender, user_profiles.gender),
                height = COALESCE(excluded.height, user_profiles.height),
                weight = COALESCE(excluded.weight, user_profiles.weight),
                fitness_level = COALESCE(excluded.fitness_level, user_profiles.fitness_level),
                goal = COALESCE(excluded.goal, user_profiles.goal),
                bio = COALESCE(excluded.bio, user_profiles.bio),
                weight_history = CASE
                    WHEN excluded.weight IS NULL THEN user_profiles.weight_history
                    ELSE json_insert(user_profiles.weight_history, '$[#]', excluded.weight)
                END,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(input.age)
        .bind(input.gender)
        .bind(input.height)
        .bind(input.weight)
        .bind(input.fitness_level)
        .bind(input.goal)
        .bind(&input.bio)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("save profile", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitnessGoal, Gender};

    #[tokio::test]
    async fn test_upsert_keeps_one_row_and_merges_fields() {
        let db = Database::in_memory().await.unwrap();
        let user = Uuid::new_v4();

        let first = db
            .upsert_profile(
                user,
                &ProfileInput {
                    name: Some("Sam".to_string()),
                    gender: Some(Gender::Other),
                    weight: Some(80.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(first.weight_history, vec![80.0]);

        let second = db
            .upsert_profile(
                user,
                &ProfileInput {
                    goal: Some(FitnessGoal::GainMuscle),
                    weight: Some(82.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name.as_deref(), Some("Sam"));
        assert_eq!(second.gender, Some(Gender::Other));
        assert_eq!(second.goal, Some(FitnessGoal::GainMuscle));
        assert_eq!(second.weight, Some(82.5));
        assert_eq!(second.weight_history, vec![80.0, 82.5]);
        assert_eq!(second.created_at, first.created_at);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_update_without_weight_leaves_history() {
        let db = Database::in_memory().await.unwrap();
        let user = Uuid::new_v4();

        assert!(db.get_profile(user).await.unwrap().is_none());

        let created = db
            .upsert_profile(
                user,
                &ProfileInput {
                    bio: Some("Lifting since 2019".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(created.weight_history.is_empty());

        db.upsert_profile(
            user,
            &ProfileInput {
                age: Some(31),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = db.get_profile(user).await.unwrap().unwrap();
        assert_eq!(stored.age, Some(31));
        assert_eq!(stored.bio.as_deref(), Some("Lifting since 2019"));
        assert!(stored.weight_history.is_empty());
    }

    #[tokio::test]
    async fn test_profiles_are_per_user() {
        let db = Database::in_memory().await.unwrap();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        db.upsert_profile(a, &ProfileInput { age: Some(20), ..Default::default() })
            .await
            .unwrap();
        db.upsert_profile(b, &ProfileInput { age: Some(40), ..Default::default() })
            .await
            .unwrap();

        assert_eq!(db.get_profile(a).await.unwrap().unwrap().age, Some(20));
        assert_eq!(db.get_profile(b).await.unwrap().unwrap().age, Some(40));
    }
}
