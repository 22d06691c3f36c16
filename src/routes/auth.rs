// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login hand-off, logout and session info.
//!
//! Sign-in itself happens at the identity provider; this service only sends
//! the browser there and clears the session cookie on logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::routes::{ok, ActionResponse};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/logout", post(logout))
}

/// Routes that need a session (mounted behind the API auth layer).
pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/session", get(session))
}

#[derive(Deserialize)]
pub struct LoginParams {
    /// Page to return to after signing in
    next: Option<String>,
}

/// Only same-site absolute paths are forwarded.
fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
}

/// Send the browser to the identity provider's login page.
async fn login(State(state): State<Arc<AppState>>, Query(params): Query<LoginParams>) -> Redirect {
    let target = match safe_next(params.next.as_deref()) {
        Some(next) => {
            let separator = if state.config.auth_login_url.contains('?') {
                '&'
            } else {
                '?'
            };
            format!(
                "{}{}next={}",
                state.config.auth_login_url,
                separator,
                urlencoding::encode(next)
            )
        }
        None => state.config.auth_login_url.clone(),
    };
    Redirect::temporary(&target)
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    tracing::info!("User logged out");
    (jar.remove(removal), StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: uuid::Uuid,
    pub email: Option<String>,
    pub expires_at: Option<String>,
}

async fn session(Extension(user): Extension<AuthUser>) -> Json<ActionResponse<SessionResponse>> {
    ok(SessionResponse {
        user_id: user.user_id,
        email: user.email,
        expires_at: user.expires_at.map(format_utc_rfc3339),
    })
}
