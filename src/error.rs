// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every failure is returned as a tagged result
//! (`{"success": false, "error": ...}`) instead of a bare status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to list of human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Push delivery error: {0}")]
    PushDelivery(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a validation error for a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(fields)
    }

    /// Map a sqlx error raised while performing `action`.
    ///
    /// Foreign-key violations are caller mistakes, not outages: a dangling
    /// reference on insert/update is a bad request, a still-referenced row on
    /// delete is a conflict.
    pub fn from_sqlx(action: &str, err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return if action.starts_with("delete") {
                    AppError::Conflict(format!("Cannot {action}: still referenced"))
                } else {
                    AppError::BadRequest(format!("Cannot {action}: referenced row does not exist"))
                };
            }
        }
        AppError::Database(format!("Failed to {action}: {err}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", e.code))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, fields) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None, None),
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                None,
                Some(fields),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg), None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg), None),
            AppError::PushDelivery(msg) => {
                tracing::warn!(error = %msg, "Push delivery failed");
                (StatusCode::BAD_GATEWAY, "push_error", Some(msg), None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None, None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
