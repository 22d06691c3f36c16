// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite connection pool wrapper.
//!
//! Entity operations live in sibling modules as further `impl Database`
//! blocks:
//! - `exercises` (CRUD, search)
//! - `sets` (logging, listing, aggregates)
//! - `profiles` (atomic upsert)
//! - `preferences`
//! - `templates` (templates and their exercise presets)

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;
use sqlx::Sqlite;

use crate::error::AppError;
use crate::models::Exercise;

const MAX_CONNECTIONS: u32 = 5;

/// Database handle. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at `url` and apply pending migrations.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(url = %redact(url), "Connected to database");
        Ok(db)
    }

    /// Create a fresh in-memory database (tests and local experiments).
    ///
    /// The pool holds exactly one connection that never expires: every
    /// connection to `sqlite::memory:` is a separate database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Fetch exercises by ID, keyed by ID. Unknown IDs are simply absent.
    pub(crate) async fn exercises_by_id(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, Exercise>, AppError> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM exercises WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in &ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let exercises: Vec<Exercise> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_sqlx("fetch exercises", e))?;

        Ok(exercises.into_iter().map(|e| (e.id, e)).collect())
    }
}

/// Hide credentials or query strings when logging a connection URL.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Append `WHERE` before the first condition and `AND` before the rest.
pub(crate) struct Conditions {
    any: bool,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self { any: false }
    }

    pub(crate) fn next<'q>(&mut self, query: &mut QueryBuilder<'q, Sqlite>) {
        query.push(if self.any { " AND " } else { " WHERE " });
        self.any = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_strips_query() {
        assert_eq!(redact("sqlite://data.db?mode=rwc"), "sqlite://data.db");
        assert_eq!(redact("sqlite::memory:"), "sqlite::memory:");
    }

    #[tokio::test]
    async fn test_in_memory_runs_migrations() {
        let db = Database::in_memory().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
