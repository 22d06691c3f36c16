// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout generation flow: preference form, plan review, session start.
//!
//! Progress is kept per user in memory and is lost on restart. The plan
//! offered for review is the same fixed plan for every submission; the
//! submitted preferences are stored and echoed back but do not rank or
//! select exercises.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    BodyPartFocus, MoveDirection, PlannedExercise, PlannedExerciseEdit, PreferenceForm,
    RepTarget, SessionDuration, WorkoutIntensity, WorkoutLocation, WorkoutPlan,
    WorkoutPreferences,
};

pub const FORM_PATH: &str = "/protected/dashboard/workouts/generate";
pub const RESULT_PATH: &str = "/protected/dashboard/workouts/generate/result";
pub const SESSION_PATH: &str = "/protected/dashboard/workouts/session";

pub const INCOMPLETE_FORM_MESSAGE: &str = "Please fill in all fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStep {
    Form,
    Result,
    Session,
}

#[derive(Debug, Clone)]
struct GenerationSession {
    step: GenerationStep,
    preferences: WorkoutPreferences,
    plan: WorkoutPlan,
}

/// Plan under review together with the preferences that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReview {
    pub step: GenerationStep,
    pub preferences: WorkoutPreferences,
    pub plan: WorkoutPlan,
}

impl PreferenceForm {
    /// Check that every field is filled in.
    pub fn complete(self) -> Result<WorkoutPreferences, AppError> {
        let mut missing = Vec::new();
        if self.body_parts.is_empty() {
            missing.push("body_parts");
        }
        if self.duration.is_none() {
            missing.push("duration");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        if self.intensity.is_none() {
            missing.push("intensity");
        }

        match (self.duration, self.location, self.intensity) {
            (Some(duration), Some(location), Some(intensity)) if missing.is_empty() => {
                Ok(WorkoutPreferences {
                    body_parts: self.body_parts,
                    duration,
                    location,
                    intensity,
                })
            }
            _ => Err(AppError::Validation(
                missing
                    .into_iter()
                    .map(|field| (field.to_string(), vec![INCOMPLETE_FORM_MESSAGE.to_string()]))
                    .collect(),
            )),
        }
    }
}

/// Per-user generation progress.
#[derive(Clone, Default)]
pub struct GenerationStore {
    sessions: Arc<DashMap<Uuid, GenerationSession>>,
}

impl GenerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step for the user; `Form` until preferences are submitted.
    pub fn step(&self, user_id: Uuid) -> GenerationStep {
        self.sessions
            .get(&user_id)
            .map(|s| s.step)
            .unwrap_or(GenerationStep::Form)
    }

    pub fn preferences(&self, user_id: Uuid) -> Option<WorkoutPreferences> {
        self.sessions.get(&user_id).map(|s| s.preferences.clone())
    }

    /// Submit the preference form and move to the review step.
    ///
    /// Resubmitting replaces the stored preferences and starts over with a
    /// fresh plan.
    pub fn submit(&self, user_id: Uuid, form: PreferenceForm) -> Result<PlanReview, AppError> {
        let preferences = form.complete()?;
        let session = GenerationSession {
            step: GenerationStep::Result,
            preferences,
            plan: fixed_plan(),
        };
        let review = review(&session);
        self.sessions.insert(user_id, session);
        tracing::debug!(user_id = %user_id, "Workout preferences submitted");
        Ok(review)
    }

    /// The plan under review, if the form has been submitted.
    pub fn review(&self, user_id: Uuid) -> Option<PlanReview> {
        self.sessions.get(&user_id).map(|s| review(&s))
    }

    /// Apply an edit to one planned exercise.
    pub fn update_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        edit: PlannedExerciseEdit,
    ) -> Result<PlanReview, AppError> {
        self.with_plan(user_id, |plan| {
            let exercise = plan
                .exercises
                .iter_mut()
                .find(|e| e.id == exercise_id)
                .ok_or_else(|| missing_exercise(exercise_id))?;

            if let Some(name) = edit.name {
                exercise.name = name;
            }
            if let Some(sets) = edit.sets {
                exercise.sets = sets;
            }
            if let Some(reps) = edit.reps {
                exercise.reps = reps;
            }
            if let Some(weight) = edit.weight {
                exercise.weight = Some(weight);
            }
            if let Some(rest_time) = edit.rest_time {
                exercise.rest_time = rest_time;
            }
            if let Some(notes) = edit.notes {
                exercise.notes = Some(notes).filter(|n| !n.trim().is_empty());
            }
            Ok(())
        })
    }

    pub fn remove_exercise(&self, user_id: Uuid, exercise_id: &str) -> Result<PlanReview, AppError> {
        self.with_plan(user_id, |plan| {
            let index = position(plan, exercise_id)?;
            plan.exercises.remove(index);
            Ok(())
        })
    }

    /// Swap an exercise with its neighbour. Moving past either end does nothing.
    pub fn move_exercise(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        direction: MoveDirection,
    ) -> Result<PlanReview, AppError> {
        self.with_plan(user_id, |plan| {
            let index = position(plan, exercise_id)?;
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => Some(index + 1).filter(|&i| i < plan.exercises.len()),
            };
            if let Some(target) = target {
                plan.exercises.swap(index, target);
            }
            Ok(())
        })
    }

    /// Begin the reviewed workout.
    pub fn start(&self, user_id: Uuid) -> Result<PlanReview, AppError> {
        let mut session = self
            .sessions
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("No workout plan to start".to_string()))?;
        session.step = GenerationStep::Session;
        tracing::info!(
            user_id = %user_id,
            exercises = session.plan.exercises.len(),
            "Workout session started"
        );
        Ok(review(&session))
    }

    fn with_plan(
        &self,
        user_id: Uuid,
        edit: impl FnOnce(&mut WorkoutPlan) -> Result<(), AppError>,
    ) -> Result<PlanReview, AppError> {
        let mut session = self
            .sessions
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("No workout plan under review".to_string()))?;
        if session.step != GenerationStep::Result {
            return Err(AppError::Conflict("Workout has already started".to_string()));
        }
        edit(&mut session.plan)?;
        Ok(review(&session))
    }
}

fn review(session: &GenerationSession) -> PlanReview {
    PlanReview {
        step: session.step,
        preferences: session.preferences.clone(),
        plan: session.plan.clone(),
    }
}

fn position(plan: &WorkoutPlan, exercise_id: &str) -> Result<usize, AppError> {
    plan.exercises
        .iter()
        .position(|e| e.id == exercise_id)
        .ok_or_else(|| missing_exercise(exercise_id))
}

fn missing_exercise(exercise_id: &str) -> AppError {
    AppError::NotFound(format!("Exercise {} is not in the plan", exercise_id))
}

#[allow(clippy::too_many_arguments)]
fn planned(
    id: &str,
    name: &str,
    sets: u32,
    reps: RepTarget,
    rest_time: u32,
    category: &str,
    primary_bodypart: &str,
    notes: Option<&str>,
) -> PlannedExercise {
    PlannedExercise {
        id: id.to_string(),
        name: name.to_string(),
        sets,
        reps,
        weight: None,
        rest_time,
        category: category.to_string(),
        primary_bodypart: primary_bodypart.to_string(),
        notes: notes.map(str::to_string),
    }
}

/// The plan offered for every submission.
pub fn fixed_plan() -> WorkoutPlan {
    WorkoutPlan {
        id: "workout-1".to_string(),
        name: "Full Body HIIT Workout".to_string(),
        duration: SessionDuration::Minutes30,
        body_parts: vec![BodyPartFocus::FullBody],
        location: WorkoutLocation::HomeNoEquipment,
        intensity: WorkoutIntensity::Intermediate,
        exercises: vec![
            planned(
                "1",
                "Push-ups",
                3,
                RepTarget::Count(12),
                60,
                "Bodyweight",
                "Chest",
                Some("Keep your core tight throughout the movement"),
            ),
            planned("2", "Bodyweight Squats", 3, RepTarget::Count(15), 90, "Bodyweight", "Legs", None),
            planned(
                "3",
                "Plank",
                3,
                RepTarget::Text("30-45 sec".to_string()),
                60,
                "Bodyweight",
                "Core",
                None,
            ),
            planned("4", "Mountain Climbers", 3, RepTarget::Count(20), 45, "Cardio", "Full Body", None),
            planned(
                "5",
                "Burpees",
                2,
                RepTarget::Count(8),
                120,
                "Cardio",
                "Full Body",
                Some("Take your time, focus on form over speed"),
            ),
        ],
        estimated_time: 25,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Choices offered on the preference form.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub body_parts: Vec<FormOption>,
    pub durations: Vec<FormOption>,
    pub locations: Vec<FormOption>,
    pub intensities: Vec<FormOption>,
}

fn choices(items: &[(&'static str, &'static str, &'static str)]) -> Vec<FormOption> {
    items
        .iter()
        .map(|&(value, label, description)| FormOption {
            value,
            label,
            description,
        })
        .collect()
}

pub fn options() -> GenerationOptions {
    GenerationOptions {
        body_parts: choices(&[
            ("full-body", "Full Body", "Complete workout targeting all muscle groups"),
            ("upper-body", "Upper Body", "Chest, shoulders, arms, and back"),
            ("lower-body", "Lower Body", "Legs, glutes, and calves"),
            ("push", "Push (Chest, Shoulders, Triceps)", "Pushing movements and muscles"),
            ("pull", "Pull (Back, Biceps)", "Pulling movements and muscles"),
            ("legs", "Legs & Glutes", "Lower body focus"),
            ("core", "Core & Abs", "Abdominal and core muscles"),
            ("cardio", "Cardio", "Heart rate and endurance training"),
        ]),
        durations: choices(&[
            ("15", "15 minutes", "Quick session"),
            ("30", "30 minutes", "Standard workout"),
            ("45", "45 minutes", "Extended session"),
            ("60", "60 minutes", "Full workout"),
            ("90", "90+ minutes", "Extended training"),
        ]),
        locations: choices(&[
            ("home-no-equipment", "Home (No Equipment)", "Bodyweight exercises only"),
            ("home-basic-equipment", "Home (Basic Equipment)", "Dumbbells, resistance bands, etc."),
            ("gym", "Gym", "Full gym equipment available"),
            ("outdoor", "Outdoor", "Park, running track, outdoor space"),
        ]),
        intensities: choices(&[
            ("beginner", "Beginner", "New to fitness or getting back into it"),
            ("intermediate", "Intermediate", "Regular exercise routine"),
            ("advanced", "Advanced", "Experienced with challenging workouts"),
        ]),
    }
}
