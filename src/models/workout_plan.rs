// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout generation preferences and the reviewed plan.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyPartFocus {
    FullBody,
    UpperBody,
    LowerBody,
    Push,
    Pull,
    Legs,
    Core,
    Cardio,
}

/// Planned session length in minutes ("90" means 90 or more).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionDuration {
    #[serde(rename = "15")]
    Minutes15,
    #[serde(rename = "30")]
    Minutes30,
    #[serde(rename = "45")]
    Minutes45,
    #[serde(rename = "60")]
    Minutes60,
    #[serde(rename = "90")]
    Minutes90,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutLocation {
    HomeNoEquipment,
    HomeBasicEquipment,
    Gym,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutIntensity {
    Beginner,
    Intermediate,
    Advanced,
}

/// Raw preference form as submitted; any field may still be unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceForm {
    #[serde(default)]
    pub body_parts: Vec<BodyPartFocus>,
    pub duration: Option<SessionDuration>,
    pub location: Option<WorkoutLocation>,
    pub intensity: Option<WorkoutIntensity>,
}

/// Completed preference form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPreferences {
    pub body_parts: Vec<BodyPartFocus>,
    pub duration: SessionDuration,
    pub location: WorkoutLocation,
    pub intensity: WorkoutIntensity,
}

/// Repetition target: a count or a free-form prescription ("30-45 sec").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepTarget {
    Count(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: RepTarget,
    pub weight: Option<f64>,
    /// Seconds
    pub rest_time: u32,
    pub category: String,
    pub primary_bodypart: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub duration: SessionDuration,
    pub body_parts: Vec<BodyPartFocus>,
    pub location: WorkoutLocation,
    pub intensity: WorkoutIntensity,
    pub exercises: Vec<PlannedExercise>,
    /// Minutes
    pub estimated_time: u32,
}

/// Edit applied to one planned exercise. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlannedExerciseEdit {
    #[validate(length(min = 1, max = 100, message = "Exercise name is required"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 20, message = "Sets must be between 1 and 20"))]
    pub sets: Option<u32>,
    pub reps: Option<RepTarget>,
    #[validate(range(exclusive_min = 0.0, message = "Weight must be a positive number"))]
    pub weight: Option<f64>,
    #[validate(range(max = 600, message = "Rest time must be at most 10 minutes"))]
    pub rest_time: Option<u32>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}
