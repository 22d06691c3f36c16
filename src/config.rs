// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Audience the identity provider puts in session tokens.
pub const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Database connection string (sqlx URL)
    pub database_url: String,
    /// Frontend URL, allowed as CORS origin
    pub frontend_url: String,
    /// Where `/auth/login` sends the browser (identity provider login page)
    pub auth_login_url: String,
    /// Server port
    pub port: u16,
    /// Insert the default exercise catalog at startup
    pub seed_default_exercises: bool,
    /// VAPID public key handed to browsers subscribing to push
    pub vapid_public_key: Option<String>,
    /// VAPID contact (mailto: or https: URL)
    pub vapid_subject: String,
    /// Required `aud` claim of session JWTs; `None` skips the audience check
    pub jwt_audience: Option<String>,

    // --- Secrets ---
    /// Secret used by the identity provider to sign session JWTs (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// VAPID private key
    pub vapid_private_key: Option<String>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            auth_login_url: "http://localhost:3000/auth/login".to_string(),
            port: 8080,
            seed_default_exercises: false,
            vapid_public_key: Some("test_vapid_public_key".to_string()),
            vapid_subject: "mailto:admin@localhost".to_string(),
            jwt_audience: Some(DEFAULT_JWT_AUDIENCE.to_string()),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            vapid_private_key: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://gym-tracker.db?mode=rwc".to_string()),
            auth_login_url: env::var("AUTH_LOGIN_URL")
                .unwrap_or_else(|_| format!("{}/auth/login", frontend_url.trim_end_matches('/'))),
            frontend_url,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            seed_default_exercises: env::var("SEED_DEFAULT_EXERCISES")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            vapid_public_key: optional_var("VAPID_PUBLIC_KEY"),
            vapid_subject: env::var("VAPID_SUBJECT")
                .unwrap_or_else(|_| "mailto:admin@localhost".to_string()),
            // Set but empty disables the check
            jwt_audience: match env::var("JWT_AUDIENCE") {
                Ok(_) => optional_var("JWT_AUDIENCE"),
                Err(_) => Some(DEFAULT_JWT_AUDIENCE.to_string()),
            },

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            vapid_private_key: optional_var("VAPID_PRIVATE_KEY"),
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
