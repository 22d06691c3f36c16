// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Set logging, listing and aggregate operations.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::db::sqlite::Conditions;
use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    CreateSetInput, DateRange, Set, SetFilter, SetWithExercise, TrainingDay, UpdateSetInput,
    WorkoutStats,
};

impl Database {
    /// Log a set for `user_id` and return it with its exercise.
    pub async fn create_set(
        &self,
        user_id: Uuid,
        input: &CreateSetInput,
    ) -> Result<SetWithExercise, AppError> {
        let set = self.insert_set(user_id, input, Utc::now()).await?;
        self.attach_exercise(set).await
    }

    /// Insert a set with an explicit creation time.
    pub async fn insert_set(
        &self,
        user_id: Uuid,
        input: &CreateSetInput,
        created_at: DateTime<Utc>,
    ) -> Result<Set, AppError> {
        sqlx::query_as::<_, Set>(
            r#"
            INSERT INTO sets (created_at, exercise, reps, weight, intensity, notes, user_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(created_at)
        .bind(input.exercise)
        .bind(input.reps)
        .bind(input.weight)
        .bind(input.intensity)
        .bind(&input.notes)
        .bind(user_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("create set", e))
    }

    /// List sets matching every given filter, newest first.
    pub async fn list_sets(&self, filter: &SetFilter) -> Result<Vec<Set>, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM sets");
        let mut conditions = Conditions::new();

        if let Some(user_id) = filter.user_id {
            conditions.next(&mut query);
            query.push("user_id = ").push_bind(user_id);
        }
        if let Some(exercise_id) = filter.exercise_id {
            conditions.next(&mut query);
            query.push("exercise = ").push_bind(exercise_id);
        }
        if let Some(cursor) = filter.before {
            conditions.next(&mut query);
            query
                .push("(created_at < ")
                .push_bind(cursor.created_at)
                .push(" OR (created_at = ")
                .push_bind(cursor.created_at)
                .push(" AND id < ")
                .push_bind(cursor.id)
                .push("))");
        }

        query.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        query
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("fetch sets", e))
    }

    /// `list_sets` with each set's exercise attached.
    pub async fn list_sets_with_exercise(
        &self,
        filter: &SetFilter,
    ) -> Result<Vec<SetWithExercise>, AppError> {
        let sets = self.list_sets(filter).await?;
        let exercises = self.exercises_by_id(sets.iter().map(|s| s.exercise)).await?;

        Ok(sets
            .into_iter()
            .filter_map(|set| match exercises.get(&set.exercise) {
                Some(exercise) => Some(SetWithExercise {
                    exercise_data: exercise.clone(),
                    set,
                }),
                None => {
                    tracing::warn!(set_id = set.id, exercise = set.exercise, "Set references missing exercise");
                    None
                }
            })
            .collect())
    }

    /// Partially update a set owned by `owner`.
    pub async fn update_set(
        &self,
        id: i64,
        owner: Uuid,
        input: &UpdateSetInput,
    ) -> Result<Option<SetWithExercise>, AppError> {
        let updated = sqlx::query_as::<_, Set>(
            r#"
            UPDATE sets SET
                exercise = COALESCE(?3, exercise),
                reps = COALESCE(?4, reps),
                weight = COALESCE(?5, weight),
                intensity = COALESCE(?6, intensity),
                notes = COALESCE(?7, notes)
            WHERE id = ?1 AND user_id = ?2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(input.exercise)
        .bind(input.reps)
        .bind(input.weight)
        .bind(input.intensity)
        .bind(&input.notes)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("update set", e))?;

        match updated {
            Some(set) => Ok(Some(self.attach_exercise(set).await?)),
            None => Ok(None),
        }
    }

    /// Delete a set owned by `owner`. Returns `false` if there was none.
    pub async fn delete_set(&self, id: i64, owner: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sets WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("delete set", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count, sum and average of weight and reps over a user's sets.
    pub async fn workout_stats(
        &self,
        user_id: Uuid,
        range: Option<DateRange>,
    ) -> Result<WorkoutStats, AppError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT
                COUNT(id) AS set_count,
                SUM(weight) AS total_weight,
                SUM(reps) AS total_reps,
                AVG(weight) AS avg_weight,
                AVG(reps) AS avg_reps
            FROM sets WHERE user_id = "#,
        );
        query.push_bind(user_id);
        if let Some(range) = range {
            query
                .push(" AND created_at >= ")
                .push_bind(range.from)
                .push(" AND created_at < ")
                .push_bind(range.until);
        }

        query
            .build_query_as()
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::from_sqlx("fetch workout stats", e))
    }

    /// Days in `[from, to)` on which the user logged sets, oldest first.
    pub async fn training_days(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TrainingDay>, AppError> {
        sqlx::query_as::<_, TrainingDay>(
            r#"
            SELECT substr(created_at, 1, 10) AS date, COUNT(*) AS set_count
            FROM sets
            WHERE user_id = ?1 AND created_at >= ?2 AND created_at < ?3
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::from_sqlx("fetch training days", e))
    }

    async fn attach_exercise(&self, set: Set) -> Result<SetWithExercise, AppError> {
        let exercise = self.get_exercise(set.exercise).await?.ok_or_else(|| {
            AppError::Database(format!("Set {} references missing exercise {}", set.id, set.exercise))
        })?;
        Ok(SetWithExercise {
            set,
            exercise_data: exercise,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyRegion, CreateExerciseInput, SetCursor, SetIntensity};
    use chrono::{Duration, TimeZone};

    async fn db_with_exercises() -> (Database, i64, i64) {
        let db = Database::in_memory().await.unwrap();
        let mut ids = Vec::new();
        for name in ["Deadlift", "Pull-up"] {
            let exercise = db
                .create_exercise(
                    None,
                    &CreateExerciseInput {
                        name: name.to_string(),
                        body_region: BodyRegion::Full,
                        primary_bodypart: "Back".to_string(),
                        secondary_bodypart: None,
                        category: None,
                        level: None,
                    },
                )
                .await
                .unwrap();
            ids.push(exercise.id);
        }
        (db, ids[0], ids[1])
    }

    fn set(exercise: i64, reps: i64, weight: f64) -> CreateSetInput {
        CreateSetInput {
            exercise,
            reps: Some(reps),
            weight: Some(weight),
            intensity: Some(SetIntensity::Moderate),
            notes: None,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_list_sets_filters_and_orders_newest_first() {
        let (db, deadlift, pullup) = db_with_exercises().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        db.insert_set(alice, &set(deadlift, 5, 100.0), at(1, 9)).await.unwrap();
        db.insert_set(alice, &set(pullup, 8, 10.0), at(1, 10)).await.unwrap();
        db.insert_set(alice, &set(deadlift, 3, 120.0), at(3, 9)).await.unwrap();
        db.insert_set(bob, &set(deadlift, 5, 80.0), at(2, 9)).await.unwrap();

        let sets = db
            .list_sets(&SetFilter {
                user_id: Some(alice),
                exercise_id: Some(deadlift),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.user_id == alice && s.exercise == deadlift));
        assert_eq!(sets[0].created_at, at(3, 9));
        assert_eq!(sets[1].created_at, at(1, 9));

        let all_deadlifts = db
            .list_sets(&SetFilter {
                exercise_id: Some(deadlift),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all_deadlifts.len(), 3);
    }

    #[tokio::test]
    async fn test_list_sets_cursor_breaks_ties_by_id() {
        let (db, deadlift, _) = db_with_exercises().await;
        let user = Uuid::new_v4();
        let same_time = at(5, 12);
        let first = db.insert_set(user, &set(deadlift, 1, 50.0), same_time).await.unwrap();
        let second = db.insert_set(user, &set(deadlift, 2, 50.0), same_time).await.unwrap();

        let page = db
            .list_sets(&SetFilter {
                user_id: Some(user),
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page[0].id, second.id);

        let next = db
            .list_sets(&SetFilter {
                user_id: Some(user),
                before: Some(SetCursor {
                    created_at: page[0].created_at,
                    id: page[0].id,
                }),
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(next[0].id, first.id);
    }

    #[tokio::test]
    async fn test_workout_stats_with_and_without_range() {
        let (db, deadlift, pullup) = db_with_exercises().await;
        let user = Uuid::new_v4();

        db.insert_set(user, &set(deadlift, 5, 100.0), at(1, 9)).await.unwrap();
        db.insert_set(user, &set(deadlift, 3, 120.0), at(2, 9)).await.unwrap();
        db.insert_set(user, &set(pullup, 10, 20.0), at(10, 9)).await.unwrap();
        db.insert_set(Uuid::new_v4(), &set(pullup, 99, 99.0), at(2, 9)).await.unwrap();

        let all = db.workout_stats(user, None).await.unwrap();
        assert_eq!(all.set_count, 3);
        assert_eq!(all.total_reps, Some(18));
        assert_eq!(all.total_weight, Some(240.0));
        assert_eq!(all.avg_reps, Some(6.0));
        assert_eq!(all.avg_weight, Some(80.0));

        let ranged = db
            .workout_stats(
                user,
                Some(DateRange {
                    from: at(1, 0),
                    until: at(2, 10),
                }),
            )
            .await
            .unwrap();
        assert_eq!(ranged.set_count, 2);
        assert_eq!(ranged.total_weight, Some(220.0));

        let empty = db.workout_stats(Uuid::new_v4(), None).await.unwrap();
        assert_eq!(empty.set_count, 0);
        assert_eq!(empty.total_weight, None);
        assert_eq!(empty.avg_reps, None);
    }

    #[tokio::test]
    async fn test_workout_stats_range_covers_fractional_last_second() {
        let (db, deadlift, _) = db_with_exercises().await;
        let user = Uuid::new_v4();
        let last_moment = at(3, 23) + Duration::minutes(59) + Duration::milliseconds(59_500);

        db.insert_set(user, &set(deadlift, 5, 100.0), last_moment).await.unwrap();
        db.insert_set(user, &set(deadlift, 5, 100.0), at(4, 0)).await.unwrap();

        let one_day = DateRange {
            from: at(3, 0),
            until: at(4, 0),
        };
        let stats = db.workout_stats(user, Some(one_day)).await.unwrap();
        assert_eq!(stats.set_count, 1);

        // An RFC3339 end bound still includes a set logged at that instant
        let up_to_it = DateRange {
            from: at(3, 0),
            until: last_moment + Duration::nanoseconds(1),
        };
        let stats = db.workout_stats(user, Some(up_to_it)).await.unwrap();
        assert_eq!(stats.set_count, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_scoped() {
        let (db, deadlift, _) = db_with_exercises().await;
        let owner = Uuid::new_v4();
        let created = db.create_set(owner, &set(deadlift, 5, 100.0)).await.unwrap();
        assert_eq!(created.exercise_data.name, "Deadlift");

        let stranger = Uuid::new_v4();
        let edit = UpdateSetInput {
            reps: Some(6),
            ..Default::default()
        };
        assert!(db.update_set(created.set.id, stranger, &edit).await.unwrap().is_none());
        assert!(!db.delete_set(created.set.id, stranger).await.unwrap());

        let updated = db.update_set(created.set.id, owner, &edit).await.unwrap().unwrap();
        assert_eq!(updated.set.reps, Some(6));
        assert_eq!(updated.set.weight, Some(100.0));

        assert!(db.delete_set(created.set.id, owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_training_days_groups_by_date() {
        let (db, deadlift, _) = db_with_exercises().await;
        let user = Uuid::new_v4();
        db.insert_set(user, &set(deadlift, 5, 100.0), at(4, 8)).await.unwrap();
        db.insert_set(user, &set(deadlift, 5, 100.0), at(4, 18)).await.unwrap();
        db.insert_set(user, &set(deadlift, 5, 100.0), at(6, 8)).await.unwrap();

        let days = db
            .training_days(user, at(1, 0), at(1, 0) + Duration::days(31))
            .await
            .unwrap();

        assert_eq!(
            days,
            vec![
                TrainingDay {
                    date: "2026-03-04".to_string(),
                    set_count: 2
                },
                TrainingDay {
                    date: "2026-03-06".to_string(),
                    set_count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_set_for_unknown_exercise_is_bad_request() {
        let (db, _, _) = db_with_exercises().await;
        let err = db
            .create_set(Uuid::new_v4(), &set(4242, 5, 100.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
