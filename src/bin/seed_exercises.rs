// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Insert the default exercise catalog into the configured database.
//!
//! Exercises that already exist (by name) are left untouched, so this is
//! safe to run repeatedly.

use gym_tracker::db::{seed::default_exercises, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gym_tracker=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://gym-tracker.db?mode=rwc".to_string());

    let catalog = default_exercises()?;
    let db = Database::connect(&database_url).await?;
    let inserted = db.seed_default_exercises().await?;
    db.close().await;

    tracing::info!(
        catalog = catalog.len(),
        inserted,
        skipped = catalog.len() as u64 - inserted,
        "Seeding complete"
    );
    Ok(())
}
