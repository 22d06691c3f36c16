// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregates over a user's logged sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Count, sums and averages of weight and reps.
///
/// Sums and averages are `None` when no set in the range has a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutStats {
    pub set_count: i64,
    pub total_weight: Option<f64>,
    pub total_reps: Option<i64>,
    pub avg_weight: Option<f64>,
    pub avg_reps: Option<f64>,
}

/// Creation-time bounds, `from <= created_at < until`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

/// Number of sets logged on one UTC day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingDay {
    /// YYYY-MM-DD
    pub date: String,
    pub set_count: i64,
}
