// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite via sqlx).

mod exercises;
mod preferences;
mod profiles;
pub mod seed;
mod sets;
pub mod sqlite;
mod templates;

pub use sqlite::Database;

