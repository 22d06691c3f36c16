// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym Tracker API Server
//!
//! Serves the exercise catalog, set logging, templates, profile, stats and
//! the workout generation flow for signed-in users.

use gym_tracker::{config::Config, db::Database, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Gym Tracker API");

    let db = Database::connect(&config.database_url).await?;

    if config.seed_default_exercises {
        let inserted = db.seed_default_exercises().await?;
        tracing::info!(inserted, "Default exercises seeded");
    }

    if config.vapid_public_key.is_none() {
        tracing::warn!("VAPID_PUBLIC_KEY not set, push subscriptions are disabled");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db)?);

    // Build router
    let app = gym_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gym_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
