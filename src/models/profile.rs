// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

use crate::models::exercise::non_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FitnessGoal {
    LoseWeight,
    GainMuscle,
    ImproveHealth,
    Other,
}

/// Stored user profile, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    /// Centimeters
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goal: Option<FitnessGoal>,
    pub bio: Option<String>,
    /// Every weight ever saved, oldest first
    #[sqlx(json)]
    pub weight_history: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields accepted from the profile form.
///
/// Every field is optional: on first save absent fields stay empty, on later
/// saves they keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileInput {
    #[validate(length(min = 2, max = 100, message = "Name must be at least 2 characters."))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age must be a positive number."))]
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Height must be a positive number."
    ))]
    pub height: Option<f64>,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "Weight must be a positive number."
    ))]
    pub weight: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goal: Option<FitnessGoal>,
    #[validate(length(max = 500, message = "Bio must not be longer than 500 characters."))]
    pub bio: Option<String>,
}

impl ProfileInput {
    pub fn normalize(mut self) -> Self {
        self.name = non_blank(self.name);
        self.bio = non_blank(self.bio);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_input_messages() {
        let input = ProfileInput {
            name: Some("A".to_string()),
            bio: Some("x".repeat(501)),
            ..Default::default()
        };

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("bio"));
        assert!(!fields.contains_key("age"));
    }

    #[test]
    fn test_profile_enum_wire_format() {
        let input: ProfileInput = serde_json::from_str(
            r#"{"gender":"prefer-not-to-say","fitness_level":"professional","goal":"gain-muscle"}"#,
        )
        .unwrap();

        assert_eq!(input.gender, Some(Gender::PreferNotToSay));
        assert_eq!(input.fitness_level, Some(FitnessLevel::Professional));
        assert_eq!(input.goal, Some(FitnessGoal::GainMuscle));
    }
}
