// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod exercise;
pub mod preference;
pub mod profile;
pub mod set;
pub mod stats;
pub mod template;
pub mod workout_plan;

pub use exercise::{
    BodyRegion, CreateExerciseInput, Exercise, ExerciseDetail, ExerciseLevel, ExerciseSearch,
    UpdateExerciseInput,
};
pub use preference::{
    CreatePreferenceInput, PreferenceWithExercise, UpdatePreferenceInput, UserPreference,
};
pub use profile::{FitnessGoal, FitnessLevel, Gender, ProfileInput, UserProfile};
pub use set::{
    CreateSetInput, Set, SetCursor, SetFilter, SetIntensity, SetWithExercise, UpdateSetInput,
};
pub use stats::{DateRange, TrainingDay, WorkoutStats};
pub use template::{
    CreateTemplateInput, ExercisePreset, PresetWithExercise, TemplateWithExercises,
    UpdateTemplateInput, WorkoutTemplate,
};
pub use workout_plan::{
    BodyPartFocus, MoveDirection, PlannedExercise, PlannedExerciseEdit, PreferenceForm,
    RepTarget, SessionDuration, WorkoutIntensity, WorkoutLocation, WorkoutPlan,
    WorkoutPreferences,
};
