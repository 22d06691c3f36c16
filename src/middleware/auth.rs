// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.
//!
//! Access tokens are issued by the external identity provider (HS256, user
//! UUID in `sub`, configured audience in `aud`). The `sb-access-token` cookie is checked first, then the
//! `Authorization: Bearer` header.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sb-access-token";

pub const LOGIN_PATH: &str = "/auth/login";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Audience, `authenticated` for signed-in users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Verify a token and build the user it identifies.
///
/// With an `audience`, the token must carry an `aud` equal to it. Without
/// one the claim is not checked.
pub fn verify_token(token: &str, signing_key: &[u8], audience: Option<&str>) -> Option<AuthUser> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    match audience {
        Some(aud) => {
            validation.set_audience(&[aud]);
            validation.set_required_spec_claims(&["exp", "aud"]);
        }
        None => validation.validate_aud = false,
    }
    let claims = match decode::<Claims>(token, &key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected session token");
            return None;
        }
    };

    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    Some(AuthUser {
        user_id,
        email: claims.email,
        expires_at: DateTime::from_timestamp(claims.exp as i64, 0),
    })
}

fn authenticate(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Option<AuthUser> {
    let token = session_token(jar, headers)?;
    verify_token(
        &token,
        &state.config.jwt_signing_key,
        state.config.jwt_audience.as_deref(),
    )
}

/// API middleware: requests without a valid session get `401`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(&state, &jar, request.headers()).ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Page middleware: requests without a valid session are sent to the login
/// page, remembering where they were going.
pub async fn require_page_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar, request.headers()) {
        Some(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        None => {
            let next_path = request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            tracing::debug!(path = next_path, "No session, redirecting to login");
            Redirect::to(&login_redirect(next_path)).into_response()
        }
    }
}

pub fn login_redirect(next_path: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, urlencoding::encode(next_path))
}
