// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout statistics.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DateRange, WorkoutStats};
use crate::routes::{ok, ActionResponse};
use crate::time_utils::parse_date_param;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}

#[derive(Deserialize)]
pub(crate) struct StatsQuery {
    /// RFC3339 timestamp or `YYYY-MM-DD`, inclusive
    pub from: Option<String>,
    /// RFC3339 timestamp or `YYYY-MM-DD`, inclusive of the whole day
    pub to: Option<String>,
}

/// Range to aggregate over; both bounds or neither.
pub(crate) fn parse_range(query: &StatsQuery) -> Result<Option<DateRange>> {
    let parse = |field: &str, raw: &str, exclusive_end: bool| {
        parse_date_param(raw, exclusive_end).ok_or_else(|| {
            AppError::field(field, "Must be an RFC3339 timestamp or a YYYY-MM-DD date")
        })
    };

    match (query.from.as_deref(), query.to.as_deref()) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) => {
            let range = DateRange {
                from: parse("from", from, false)?,
                until: parse("to", to, true)?,
            };
            if range.from >= range.until {
                return Err(AppError::field("from", "Start must not be after end"));
            }
            Ok(Some(range))
        }
        (Some(_), None) => Err(AppError::field("to", "Both 'from' and 'to' are required")),
        (None, Some(_)) => Err(AppError::field("from", "Both 'from' and 'to' are required")),
    }
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<ActionResponse<WorkoutStats>>> {
    let range = parse_range(&params)?;
    let stats = state.db.workout_stats(user.user_id, range).await?;
    Ok(ok(stats))
}
