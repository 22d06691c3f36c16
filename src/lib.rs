// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym Tracker: log exercises and sets, review generated workout plans
//!
//! This crate provides the HTTP backend: JSON actions under `/api`, page
//! view-models under `/protected`, and the in-process rest timer, workout
//! generation flow and push notification stub.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{GenerationStore, PathCache, PushService, TimerRegistry};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub cache: PathCache,
    pub timers: TimerRegistry,
    pub generation: GenerationStore,
    pub push: PushService,
}

impl AppState {
    /// Build the state around an open database.
    pub fn new(config: Config, db: Database) -> anyhow::Result<Self> {
        let push = PushService::new(config.vapid_public_key.clone())?;
        Ok(Self {
            config,
            db,
            cache: PathCache::new(),
            timers: TimerRegistry::new(),
            generation: GenerationStore::new(),
            push,
        })
    }
}
