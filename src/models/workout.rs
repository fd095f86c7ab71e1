// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout session model and the draft used to build one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{new_record_id, null_as_default, DraftError};

/// A logged training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    /// Unique within the workout collection
    pub id: String,
    pub name: String,
    /// When the session was finalized
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    /// Display order
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub completed: bool,
}

/// A single movement inside a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    /// Unique within the owning workout
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sets: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reps: u32,
    /// Load in kg
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
}

/// A workout being assembled by the user.
///
/// Nothing is persisted until [`WorkoutDraft::finalize`] yields a complete
/// [`Workout`], which is then handed to the store.
#[derive(Debug, Clone, Default)]
pub struct WorkoutDraft {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl WorkoutDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exercises: Vec::new(),
        }
    }

    /// Append a blank exercise row and return it for editing.
    pub fn add_exercise(&mut self) -> &mut Exercise {
        self.exercises.push(Exercise {
            id: new_record_id(),
            name: String::new(),
            sets: 0,
            reps: 0,
            weight: 0.0,
        });
        let last = self.exercises.len() - 1;
        &mut self.exercises[last]
    }

    /// Append a filled-in exercise.
    pub fn push_exercise(&mut self, name: impl Into<String>, sets: u32, reps: u32, weight: f64) {
        let exercise = self.add_exercise();
        exercise.name = name.into();
        exercise.sets = sets;
        exercise.reps = reps;
        exercise.weight = weight;
    }

    /// Build the finished workout.
    ///
    /// Exercise rows left without a name are dropped. Negative or non-finite
    /// weights are clamped to zero.
    pub fn finalize(self, now: DateTime<Utc>) -> Result<Workout, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let exercises = self
            .exercises
            .into_iter()
            .filter(|e| !e.name.trim().is_empty())
            .map(|mut e| {
                e.name = e.name.trim().to_string();
                if !e.weight.is_finite() || e.weight < 0.0 {
                    e.weight = 0.0;
                }
                e
            })
            .collect();

        Ok(Workout {
            id: new_record_id(),
            name: name.to_string(),
            date: now,
            exercises,
            completed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_drops_unnamed_exercises() {
        let mut draft = WorkoutDraft::new("Push Day");
        draft.push_exercise("Bench Press", 3, 8, 60.0);
        draft.add_exercise();
        draft.push_exercise("  Overhead Press ", 3, 10, 40.0);

        let workout = draft.finalize(Utc::now()).unwrap();

        assert_eq!(workout.name, "Push Day");
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[1].name, "Overhead Press");
        assert!(!workout.completed);
    }

    #[test]
    fn test_finalize_rejects_blank_name() {
        let draft = WorkoutDraft::new("   ");
        assert!(matches!(draft.finalize(Utc::now()), Err(DraftError::EmptyName)));
    }

    #[test]
    fn test_exercise_ids_are_unique() {
        let mut draft = WorkoutDraft::new("Legs");
        draft.push_exercise("Squat", 5, 5, 100.0);
        draft.push_exercise("Squat", 5, 5, 100.0);
        let workout = draft.finalize(Utc::now()).unwrap();
        assert_ne!(workout.exercises[0].id, workout.exercises[1].id);
    }

    #[test]
    fn test_completed_defaults_when_absent() {
        let workout: Workout = serde_json::from_str(
            r#"{"id":"0.42","name":"Run","date":"2024-01-15T10:00:00.000Z","exercises":[]}"#,
        )
        .unwrap();
        assert!(!workout.completed);
    }
}
