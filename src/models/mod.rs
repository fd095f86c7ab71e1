// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod chat;
pub mod meal;
pub mod plan;
pub mod profile;
pub mod workout;

pub use chat::{ChatTurn, Role};
pub use meal::Meal;
pub use plan::{MealPlan, PlanMeal};
pub use profile::{Goal, Profile};
pub use workout::{Exercise, Workout, WorkoutDraft};

use serde::{Deserialize, Deserializer};

/// Generate a fresh record id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Read a number that may be stored as `null` (an unparsed form field),
/// treating `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors from building records out of user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Calories must be a positive number, got {0}")]
    InvalidCalories(f64),
}
